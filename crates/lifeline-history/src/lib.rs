//! Lifeline History - Bounded ring buffer of committed generations
//!
//! Each forward step commits the generation it closes into a
//! [`HistoryBuffer`]. Stepping backward pops the newest one and inverts it.
//!
//! # Features
//!
//! - **Bounded memory**: Fixed-size ring buffer, no unbounded growth
//! - **O(1) push and pop**: Constant time at the newest end
//! - **Permanent eviction**: When full, pushing drops the oldest generation
//!
//! # Example
//!
//! ```rust
//! use lifeline_core::{Generation, GenerationHistory};
//! use lifeline_history::HistoryBuffer;
//!
//! let mut history = HistoryBuffer::new(2);
//! history.push(Generation::new(0));
//! history.push(Generation::new(1));
//!
//! // Full: generation 0 is evicted for good
//! let evicted = history.push(Generation::new(2));
//! assert_eq!(evicted.map(|g| g.sequence()), Some(0));
//!
//! assert_eq!(history.pop_last().map(|g| g.sequence()), Some(2));
//! assert_eq!(history.pop_last().map(|g| g.sequence()), Some(1));
//! assert!(history.pop_last().is_none());
//! ```

use lifeline_core::{Generation, GenerationHistory};
use tracing::debug;

/// Default number of committed generations kept for step-back
pub const DEFAULT_CAPACITY: usize = 100;

/// A ring buffer of committed generations, oldest first
#[derive(Debug)]
pub struct HistoryBuffer {
    /// Ring buffer storage; `None` means the slot is empty
    slots: Vec<Option<Generation>>,
    /// Next write position (one past the newest)
    head: usize,
    /// Number of generations currently stored
    count: usize,
    /// Capacity (max generations)
    capacity: usize,
}

impl HistoryBuffer {
    /// Create a new history buffer with the given capacity
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            count: 0,
            capacity,
        }
    }

    fn newest_index(&self) -> usize {
        (self.head + self.capacity - 1) % self.capacity
    }

    fn oldest_index(&self) -> usize {
        (self.head + self.capacity - self.count) % self.capacity
    }

    /// Iterate over stored generations, oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Generation> {
        let oldest = self.oldest_index();
        (0..self.count).filter_map(move |i| self.slots[(oldest + i) % self.capacity].as_ref())
    }

    /// Get statistics about the buffer
    pub fn stats(&self) -> HistoryStats {
        let (oldest, newest) = self.sequence_range().unwrap_or((0, 0));
        HistoryStats {
            capacity: self.capacity,
            count: self.count,
            oldest_sequence: oldest,
            newest_sequence: newest,
        }
    }
}

impl GenerationHistory for HistoryBuffer {
    fn push(&mut self, generation: Generation) -> Option<Generation> {
        // When full, the head slot holds the oldest generation
        let evicted = if self.count == self.capacity {
            self.slots[self.head].take()
        } else {
            None
        };

        self.slots[self.head] = Some(generation);
        self.head = (self.head + 1) % self.capacity;
        self.count = (self.count + 1).min(self.capacity);

        if let Some(old) = &evicted {
            debug!(
                sequence = old.sequence(),
                capacity = self.capacity,
                "Evicted oldest generation from history"
            );
        }
        evicted
    }

    fn peek_last(&self) -> Option<&Generation> {
        if self.count == 0 {
            return None;
        }
        self.slots[self.newest_index()].as_ref()
    }

    fn pop_last(&mut self) -> Option<Generation> {
        if self.count == 0 {
            return None;
        }
        let index = self.newest_index();
        self.head = index;
        self.count -= 1;
        self.slots[index].take()
    }

    fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.count = 0;
        self.head = 0;
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.capacity)
    }

    fn len(&self) -> usize {
        self.count
    }

    fn sequence_range(&self) -> Option<(u64, u64)> {
        if self.count == 0 {
            return None;
        }
        let oldest = self.slots[self.oldest_index()].as_ref()?;
        let newest = self.peek_last()?;
        Some((oldest.sequence(), newest.sequence()))
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Statistics about the history buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryStats {
    /// Maximum capacity
    pub capacity: usize,
    /// Current number of stored generations
    pub count: usize,
    /// Sequence number of the oldest stored generation
    pub oldest_sequence: u64,
    /// Sequence number of the newest stored generation
    pub newest_sequence: u64,
}

impl HistoryStats {
    /// Get the fill percentage (0.0 to 1.0)
    pub fn fill_ratio(&self) -> f32 {
        self.count as f32 / self.capacity as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeline_core::CellAddress;

    fn sequences(buffer: &HistoryBuffer) -> Vec<u64> {
        buffer.iter().map(Generation::sequence).collect()
    }

    #[test]
    fn test_new() {
        let buffer = HistoryBuffer::new(64);
        assert_eq!(buffer.capacity(), Some(64));
        assert_eq!(buffer.len(), 0);
        assert!(buffer.is_empty());
        assert!(buffer.peek_last().is_none());
    }

    #[test]
    #[should_panic]
    fn test_zero_capacity_panics() {
        let _ = HistoryBuffer::new(0);
    }

    #[test]
    fn test_push_and_peek() {
        let mut buffer = HistoryBuffer::new(8);
        let mut generation = Generation::new(0);
        generation.record_birth(CellAddress::new(1, 1), true);

        assert!(buffer.push(generation.clone()).is_none());
        assert_eq!(buffer.peek_last(), Some(&generation));
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_ring_buffer_wrap() {
        let mut buffer = HistoryBuffer::new(4);

        for sequence in 0..4 {
            assert!(buffer.push(Generation::new(sequence)).is_none());
        }
        assert_eq!(buffer.len(), 4);

        // Full: should wrap and evict from the oldest end
        assert_eq!(buffer.push(Generation::new(4)).map(|g| g.sequence()), Some(0));
        assert_eq!(buffer.push(Generation::new(5)).map(|g| g.sequence()), Some(1));

        assert_eq!(buffer.len(), 4);
        assert_eq!(sequences(&buffer), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_pop_is_lifo() {
        let mut buffer = HistoryBuffer::new(3);
        for sequence in 0..5 {
            buffer.push(Generation::new(sequence));
        }

        assert_eq!(buffer.pop_last().map(|g| g.sequence()), Some(4));
        assert_eq!(buffer.pop_last().map(|g| g.sequence()), Some(3));
        assert_eq!(buffer.pop_last().map(|g| g.sequence()), Some(2));
        // 0 and 1 were evicted and are unrecoverable
        assert!(buffer.pop_last().is_none());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_push_after_pop() {
        let mut buffer = HistoryBuffer::new(3);
        for sequence in 0..3 {
            buffer.push(Generation::new(sequence));
        }
        buffer.pop_last();
        buffer.push(Generation::new(10));
        buffer.push(Generation::new(11));

        assert_eq!(sequences(&buffer), vec![1, 10, 11]);
        assert_eq!(buffer.sequence_range(), Some((1, 11)));
    }

    #[test]
    fn test_clear() {
        let mut buffer = HistoryBuffer::new(3);
        buffer.push(Generation::new(0));
        buffer.push(Generation::new(1));
        buffer.clear();

        assert!(buffer.is_empty());
        assert!(buffer.sequence_range().is_none());
        assert!(buffer.pop_last().is_none());

        buffer.push(Generation::new(7));
        assert_eq!(sequences(&buffer), vec![7]);
    }

    #[test]
    fn test_stats() {
        let mut buffer = HistoryBuffer::new(10);
        for sequence in 3..8 {
            buffer.push(Generation::new(sequence));
        }

        let stats = buffer.stats();
        assert_eq!(stats.capacity, 10);
        assert_eq!(stats.count, 5);
        assert_eq!(stats.oldest_sequence, 3);
        assert_eq!(stats.newest_sequence, 7);
        assert_eq!(stats.fill_ratio(), 0.5);
    }

    #[test]
    fn test_default_capacity() {
        let buffer = HistoryBuffer::default();
        assert_eq!(buffer.capacity(), Some(DEFAULT_CAPACITY));
    }
}
