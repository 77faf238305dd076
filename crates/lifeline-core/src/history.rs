//! History trait for committed generations
//!
//! This trait is implemented by:
//! - `lifeline-history` for the bounded ring buffer the engine uses by default
//! - test doubles that keep every generation
//!
//! # Example
//!
//! ```rust,ignore
//! use lifeline_core::{Generation, GenerationHistory};
//!
//! struct Unbounded {
//!     generations: Vec<Generation>,
//! }
//!
//! impl GenerationHistory for Unbounded {
//!     fn push(&mut self, generation: Generation) -> Option<Generation> {
//!         self.generations.push(generation);
//!         None
//!     }
//!
//!     fn pop_last(&mut self) -> Option<Generation> {
//!         self.generations.pop()
//!     }
//!
//!     // ... other methods
//! }
//! ```

use crate::Generation;

/// Storage for committed generations, newest last.
///
/// Only the newest generation is ever read back: stepping backward pops it
/// and inverts it. Bounded implementations evict from the oldest end.
pub trait GenerationHistory {
    /// Append a committed generation.
    ///
    /// Returns the generation evicted to make room, if any. An evicted
    /// generation is gone for good.
    fn push(&mut self, generation: Generation) -> Option<Generation>;

    /// Get the most recently pushed generation.
    fn peek_last(&self) -> Option<&Generation>;

    /// Remove and return the most recently pushed generation.
    fn pop_last(&mut self) -> Option<Generation>;

    /// Drop every stored generation.
    fn clear(&mut self);

    /// Get the capacity of this history.
    ///
    /// Returns `None` for unbounded histories.
    fn capacity(&self) -> Option<usize>;

    /// Get the number of generations currently stored.
    fn len(&self) -> usize;

    /// Check if the history is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the sequence numbers of the oldest and newest stored generations.
    fn sequence_range(&self) -> Option<(u64, u64)>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Keeps everything, newest last
    struct SimpleHistory {
        generations: Vec<Generation>,
    }

    impl SimpleHistory {
        fn new() -> Self {
            Self {
                generations: Vec::new(),
            }
        }
    }

    impl GenerationHistory for SimpleHistory {
        fn push(&mut self, generation: Generation) -> Option<Generation> {
            self.generations.push(generation);
            None
        }

        fn peek_last(&self) -> Option<&Generation> {
            self.generations.last()
        }

        fn pop_last(&mut self) -> Option<Generation> {
            self.generations.pop()
        }

        fn clear(&mut self) {
            self.generations.clear();
        }

        fn capacity(&self) -> Option<usize> {
            None
        }

        fn len(&self) -> usize {
            self.generations.len()
        }

        fn sequence_range(&self) -> Option<(u64, u64)> {
            let first = self.generations.first()?;
            let last = self.generations.last()?;
            Some((first.sequence(), last.sequence()))
        }
    }

    #[test]
    fn test_push_and_pop() {
        let mut history = SimpleHistory::new();
        assert!(history.is_empty());

        history.push(Generation::new(0));
        history.push(Generation::new(1));

        assert_eq!(history.len(), 2);
        assert_eq!(history.peek_last().map(Generation::sequence), Some(1));
        assert_eq!(history.pop_last().map(|g| g.sequence()), Some(1));
        assert_eq!(history.pop_last().map(|g| g.sequence()), Some(0));
        assert!(history.pop_last().is_none());
    }

    #[test]
    fn test_sequence_range() {
        let mut history = SimpleHistory::new();
        assert!(history.sequence_range().is_none());

        history.push(Generation::new(4));
        history.push(Generation::new(5));
        assert_eq!(history.sequence_range(), Some((4, 5)));

        history.clear();
        assert!(history.sequence_range().is_none());
        assert_eq!(history.capacity(), None);
    }
}
