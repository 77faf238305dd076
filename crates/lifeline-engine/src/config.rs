//! Engine configuration
//!
//! All fields have defaults, so a RON file only needs to name what it
//! changes:
//!
//! ```ron
//! (
//!     history_size: 250,
//!     interval_ms: 60,
//!     randomize: (max_stamps: 40),
//! )
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of committed generations kept for step-back
pub const DEFAULT_HISTORY_SIZE: usize = lifeline_history::DEFAULT_CAPACITY;

/// Default play-loop interval
pub const DEFAULT_INTERVAL_MS: u64 = 100;

/// Default RNG seed
pub const DEFAULT_SEED: u64 = 12345;

/// Configuration for a [`SimulationEngine`](crate::SimulationEngine)
///
/// # Example
///
/// ```
/// use lifeline_engine::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_history_size(20)
///     .with_interval_ms(250);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.interval().as_millis(), 250);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Committed generations kept for step-back (at least 1)
    pub history_size: usize,
    /// Milliseconds between play-loop ticks (at least 1)
    pub interval_ms: u64,
    /// Seed for `randomize`
    pub seed: u64,
    /// Bounds for `randomize`
    pub randomize: RandomizeConfig,
}

impl EngineConfig {
    /// Parse and validate a RON configuration
    pub fn from_ron(source: &str) -> Result<Self> {
        let config: EngineConfig = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_history_size(mut self, history_size: usize) -> Self {
        self.history_size = history_size;
        self
    }

    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_randomize(mut self, randomize: RandomizeConfig) -> Self {
        self.randomize = randomize;
        self
    }

    /// Play-loop interval as a duration
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Check every field is usable
    pub fn validate(&self) -> Result<()> {
        if self.history_size == 0 {
            return Err(Error::InvalidConfig(
                "history_size must be at least 1".to_string(),
            ));
        }
        if self.interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "interval_ms must be at least 1".to_string(),
            ));
        }
        self.randomize.validate()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_size: DEFAULT_HISTORY_SIZE,
            interval_ms: DEFAULT_INTERVAL_MS,
            seed: DEFAULT_SEED,
            randomize: RandomizeConfig::default(),
        }
    }
}

/// How `randomize` fills the board
///
/// It stamps between `min_stamps` and `max_stamps` random patterns, each at
/// an origin inside the inclusive `[min_x, max_x] x [min_y, max_y]` window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomizeConfig {
    pub min_stamps: usize,
    pub max_stamps: usize,
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl RandomizeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_stamps > self.max_stamps {
            return Err(Error::InvalidConfig(format!(
                "randomize.min_stamps ({}) exceeds max_stamps ({})",
                self.min_stamps, self.max_stamps
            )));
        }
        if self.min_x > self.max_x {
            return Err(Error::InvalidConfig(format!(
                "randomize.min_x ({}) exceeds max_x ({})",
                self.min_x, self.max_x
            )));
        }
        if self.min_y > self.max_y {
            return Err(Error::InvalidConfig(format!(
                "randomize.min_y ({}) exceeds max_y ({})",
                self.min_y, self.max_y
            )));
        }
        Ok(())
    }
}

impl Default for RandomizeConfig {
    fn default() -> Self {
        Self {
            min_stamps: 8,
            max_stamps: 24,
            min_x: 0,
            max_x: 80,
            min_y: 0,
            max_y: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.history_size, 100);
        assert_eq!(config.interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_from_ron_partial() {
        let config =
            EngineConfig::from_ron("(history_size: 5, randomize: (min_stamps: 1, max_stamps: 3))")
                .unwrap();
        assert_eq!(config.history_size, 5);
        assert_eq!(config.interval_ms, DEFAULT_INTERVAL_MS);
        assert_eq!(config.randomize.min_stamps, 1);
        assert_eq!(config.randomize.max_stamps, 3);
        assert_eq!(config.randomize.max_x, RandomizeConfig::default().max_x);
    }

    #[test]
    fn test_from_ron_rejects_invalid_values() {
        let result = EngineConfig::from_ron("(history_size: 0)");
        assert!(matches!(result, Err(Error::InvalidConfig(_))));

        let result = EngineConfig::from_ron("(randomize: (min_x: 10, max_x: 5))");
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_from_ron_syntax_error() {
        let result = EngineConfig::from_ron("(history_size: )");
        assert!(matches!(result, Err(Error::Ron(_))));
    }

    #[test]
    fn test_ron_roundtrip() {
        let config = EngineConfig::default().with_seed(99).with_interval_ms(40);
        let text = ron::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = EngineConfig::default().with_interval_ms(0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
