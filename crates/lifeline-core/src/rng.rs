//! Deterministic random number generator
//!
//! Uses a simple xorshift64 algorithm so a seed always produces the same
//! random board on every platform.

use serde::{Deserialize, Serialize};

/// A deterministic random number generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifeRng {
    state: u64,
}

impl LifeRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        // xorshift never leaves zero
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Get the current state
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Generate the next raw u64 value
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random i64 in range [min, max]
    pub fn range_i64(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        let span = max.abs_diff(min).wrapping_add(1);
        let value = if span == 0 {
            // full u64 range
            self.next_u64()
        } else {
            self.next_u64() % span
        };
        min.wrapping_add_unsigned(value)
    }

    /// Generate a random usize in range [min, max]
    pub fn range_usize(&mut self, min: usize, max: usize) -> usize {
        if min >= max {
            return min;
        }
        let span = ((max - min) as u64).wrapping_add(1);
        let value = if span == 0 {
            // full u64 range
            self.next_u64()
        } else {
            self.next_u64() % span
        };
        min + value as usize
    }

    /// Pick a random element from a slice
    pub fn pick<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        if slice.is_empty() {
            None
        } else {
            let i = (self.next_u64() % slice.len() as u64) as usize;
            slice.get(i)
        }
    }
}

impl Default for LifeRng {
    fn default() -> Self {
        Self::new(12345)
    }
}
