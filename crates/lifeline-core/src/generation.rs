//! Generation diff log
//!
//! A [`Generation`] collects every birth and death since the last committed
//! step. Committed generations are what the history buffer stores, and
//! inverting one is how a step is undone.

use crate::{CellAddress, CellKey};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What happened to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationEvent {
    /// Born by the transition rule
    Birth,
    /// Died by the transition rule
    Death,
    /// Drawn, stamped or restored by a caller
    ManualBirth,
    /// Erased by a caller
    ManualDeath,
}

impl MutationEvent {
    pub fn birth(manual: bool) -> Self {
        if manual {
            MutationEvent::ManualBirth
        } else {
            MutationEvent::Birth
        }
    }

    pub fn death(manual: bool) -> Self {
        if manual {
            MutationEvent::ManualDeath
        } else {
            MutationEvent::Death
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, MutationEvent::ManualBirth | MutationEvent::ManualDeath)
    }

    /// True for events that leave the cell alive
    pub fn is_birth(&self) -> bool {
        matches!(self, MutationEvent::Birth | MutationEvent::ManualBirth)
    }
}

/// One record in a generation diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffEntry {
    pub cell: CellAddress,
    pub event: MutationEvent,
}

/// Diff log of one generation plus its sequence number
///
/// Cancellation rule: a manual birth followed by a manual death on the same
/// key (or the reverse) deletes the entry. Every other record overwrites
/// whatever entry the key already had.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Generation {
    sequence: u64,
    diff: IndexMap<CellKey, DiffEntry>,
}

impl Generation {
    /// Create an empty generation
    pub fn new(sequence: u64) -> Self {
        Self {
            sequence,
            diff: IndexMap::new(),
        }
    }

    /// Open the empty generation that follows this one
    pub fn successor(&self) -> Self {
        Self::new(self.sequence + 1)
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Record that a cell came alive
    pub fn record_birth(&mut self, cell: CellAddress, manual: bool) {
        self.record(cell, MutationEvent::birth(manual), MutationEvent::ManualDeath);
    }

    /// Record that a cell died
    pub fn record_death(&mut self, cell: CellAddress, manual: bool) {
        self.record(cell, MutationEvent::death(manual), MutationEvent::ManualBirth);
    }

    fn record(&mut self, cell: CellAddress, event: MutationEvent, cancels: MutationEvent) {
        let key = cell.key().clone();
        if event.is_manual() && self.diff.get(&key).map(|e| e.event) == Some(cancels) {
            self.diff.swap_remove(&key);
            return;
        }
        self.diff.insert(key, DiffEntry { cell, event });
    }

    pub fn entry(&self, key: &CellKey) -> Option<&DiffEntry> {
        self.diff.get(key)
    }

    /// Entries in no particular order
    pub fn entries(&self) -> impl Iterator<Item = &DiffEntry> {
        self.diff.values()
    }

    pub fn len(&self) -> usize {
        self.diff.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diff.is_empty()
    }

    /// Count entries with the given event
    pub fn count(&self, event: MutationEvent) -> usize {
        self.diff.values().filter(|e| e.event == event).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(x: i64, y: i64) -> CellKey {
        CellKey::from_coords(x, y)
    }

    #[test]
    fn test_manual_birth_then_death_cancels() {
        let mut generation = Generation::new(3);
        generation.record_birth(CellAddress::new(1, 1), true);
        generation.record_death(CellAddress::new(1, 1), true);

        assert!(generation.entry(&key(1, 1)).is_none());
        assert!(generation.is_empty());
        assert_eq!(generation.sequence(), 3);
    }

    #[test]
    fn test_manual_death_then_birth_cancels() {
        let mut generation = Generation::new(0);
        generation.record_death(CellAddress::new(0, 0), true);
        generation.record_birth(CellAddress::new(0, 0), true);
        assert!(generation.is_empty());
    }

    #[test]
    fn test_cancellation_keeps_other_entries() {
        let mut generation = Generation::new(0);
        for x in 0..4 {
            generation.record_birth(CellAddress::new(x, 0), true);
        }
        generation.record_death(CellAddress::new(0, 0), true);

        assert_eq!(generation.len(), 3);
        assert!(generation.entry(&key(0, 0)).is_none());
        for x in 1..4 {
            assert_eq!(
                generation.entry(&key(x, 0)).map(|e| e.event),
                Some(MutationEvent::ManualBirth)
            );
        }
    }

    #[test]
    fn test_automatic_overwrites_manual() {
        let mut generation = Generation::new(0);
        generation.record_birth(CellAddress::new(2, 2), true);
        generation.record_death(CellAddress::new(2, 2), false);

        let entry = generation.entry(&key(2, 2)).unwrap();
        assert_eq!(entry.event, MutationEvent::Death);
        assert_eq!(generation.len(), 1);
    }

    #[test]
    fn test_manual_does_not_cancel_automatic() {
        let mut generation = Generation::new(0);
        generation.record_birth(CellAddress::new(4, 4), false);
        generation.record_death(CellAddress::new(4, 4), true);

        let entry = generation.entry(&key(4, 4)).unwrap();
        assert_eq!(entry.event, MutationEvent::ManualDeath);
    }

    #[test]
    fn test_repeated_birth_recorded_once() {
        let mut generation = Generation::new(0);
        generation.record_birth(CellAddress::new(1, 0), true);
        generation.record_birth(CellAddress::new(1, 0), true);
        assert_eq!(generation.len(), 1);
        assert_eq!(generation.count(MutationEvent::ManualBirth), 1);
    }

    #[test]
    fn test_successor() {
        let mut generation = Generation::new(7);
        generation.record_birth(CellAddress::new(0, 0), false);
        let next = generation.successor();
        assert_eq!(next.sequence(), 8);
        assert!(next.is_empty());
    }

    #[test]
    fn test_event_helpers() {
        assert_eq!(MutationEvent::birth(true), MutationEvent::ManualBirth);
        assert_eq!(MutationEvent::death(false), MutationEvent::Death);
        assert!(MutationEvent::ManualDeath.is_manual());
        assert!(!MutationEvent::Birth.is_manual());
        assert!(MutationEvent::Birth.is_birth());
        assert!(!MutationEvent::ManualDeath.is_birth());
    }
}
