//! Saved snapshots, addressed by index

use crate::{Error, Result};
use lifeline_core::{Population, Snapshot, SnapshotSummary};

/// Ordered list of saved snapshots
///
/// Snapshots survive `reset()` and only go away through [`delete`](Self::delete).
#[derive(Debug, Default)]
pub struct SnapshotStore {
    snapshots: Vec<Snapshot>,
    /// Ordinal used for the next default name
    next_ordinal: u64,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture a population under a default name, returning its index
    pub fn save(&mut self, population: &Population) -> usize {
        let name = format!("Snapshot {}", self.next_ordinal + 1);
        self.save_named(name, population)
    }

    /// Capture a population under the given name, returning its index
    pub fn save_named(&mut self, name: impl Into<String>, population: &Population) -> usize {
        self.next_ordinal += 1;
        self.snapshots.push(Snapshot::capture(name, population));
        self.snapshots.len() - 1
    }

    /// Remove and return the snapshot at `index`
    pub fn delete(&mut self, index: usize) -> Result<Snapshot> {
        if index >= self.snapshots.len() {
            return Err(Error::snapshot_out_of_range(index, self.snapshots.len()));
        }
        Ok(self.snapshots.remove(index))
    }

    pub fn get(&self, index: usize) -> Result<&Snapshot> {
        self.snapshots
            .get(index)
            .ok_or_else(|| Error::snapshot_out_of_range(index, self.snapshots.len()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    /// Name, timestamp and count of every snapshot, in index order
    pub fn summaries(&self) -> Vec<SnapshotSummary> {
        self.snapshots.iter().map(Snapshot::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeline_core::CellAddress;

    fn population(coords: &[(i64, i64)]) -> Population {
        coords.iter().copied().map(CellAddress::from).collect()
    }

    #[test]
    fn test_default_names_keep_counting() {
        let mut store = SnapshotStore::new();
        store.save(&population(&[(0, 0)]));
        store.save(&population(&[(1, 1)]));
        store.delete(0).unwrap();
        store.save(&population(&[(2, 2)]));

        let names: Vec<_> = store.iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["Snapshot 2", "Snapshot 3"]);
    }

    #[test]
    fn test_delete_out_of_range() {
        let mut store = SnapshotStore::new();
        assert!(matches!(store.delete(0), Err(Error::InvalidArgument(_))));

        store.save(&population(&[(0, 0)]));
        assert!(matches!(store.delete(1), Err(Error::InvalidArgument(_))));
        assert!(store.delete(0).is_ok());
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_and_summaries() {
        let mut store = SnapshotStore::new();
        let index = store.save_named("pair", &population(&[(0, 0), (1, 0)]));

        assert_eq!(index, 0);
        assert_eq!(store.get(0).unwrap().total_cells(), 2);
        assert!(store.get(1).is_err());

        let summaries = store.summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "pair");
        assert_eq!(summaries[0].total_cells, 2);
    }
}
