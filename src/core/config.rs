//! Game configuration.
//!
//! The board geometry and starting layout are fixed; the only tunable rule is
//! how often a spawned tile is a 4 instead of a 2.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of tiles placed when a session starts.
pub const START_TILES: usize = 2;

/// Value of each tile placed when a session starts.
pub const START_VALUE: u32 = 2;

/// Probability that a spawned tile is a 4.
pub const DEFAULT_FOUR_PROBABILITY: f64 = 0.1;

/// Invalid configuration values.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("four-tile probability must be within [0, 1], got {0}")]
    FourProbability(f64),
}

/// Rule configuration for a session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Probability that a spawned tile has value 4 (otherwise 2).
    pub four_probability: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            four_probability: DEFAULT_FOUR_PROBABILITY,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the four-tile probability.
    #[must_use]
    pub fn with_four_probability(mut self, probability: f64) -> Self {
        self.four_probability = probability;
        self
    }

    /// Check that every field is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::FourProbability(self.four_probability));
        }
        Ok(())
    }
}
