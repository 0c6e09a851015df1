//! Game configuration.
//!
//! A `GridConfig` fixes everything about a game instance that does not
//! change between moves: board dimensions, the winning tile, spawn odds and
//! the RNG seed. It is validated before the engine adopts it; the engine
//! never clamps a bad config into shape.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};

/// Smallest supported board side.
pub const MIN_DIMENSION: usize = 2;

/// Largest supported board side.
///
/// Bounds per-line buffers so they stay inline. It does not bound tile
/// values: those are capped separately (see `tile::can_merge`).
pub const MAX_DIMENSION: usize = 16;

/// Configuration for one game instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of rows (2..=16).
    pub rows: usize,

    /// Number of columns (2..=16).
    pub cols: usize,

    /// Tile value that wins the game (default: 2048).
    /// Must be a power of two, at least 4.
    pub target_value: u64,

    /// RNG seed for spawns. `None` draws a fresh seed on reset.
    pub seed: Option<u64>,

    /// Probability that a spawned tile is a 4 instead of a 2 (default: 0.1).
    pub four_probability: f64,

    /// Keep accepting moves after the target is reached (default: true).
    /// The status stays `Won` either way.
    pub continue_after_win: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 4,
            cols: 4,
            target_value: 2048,
            seed: None,
            four_probability: 0.1,
            continue_after_win: true,
        }
    }
}

impl GridConfig {
    /// Create a config for a `rows` x `cols` board with default rules.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    /// Set the winning tile value.
    #[must_use]
    pub fn with_target(mut self, target_value: u64) -> Self {
        self.target_value = target_value;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the probability of spawning a 4.
    #[must_use]
    pub fn with_four_probability(mut self, probability: f64) -> Self {
        self.four_probability = probability;
        self
    }

    /// Choose whether play continues once the target is reached.
    #[must_use]
    pub fn with_continue_after_win(mut self, enabled: bool) -> Self {
        self.continue_after_win = enabled;
        self
    }

    /// Number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Check the config for consistency.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("rows", self.rows), ("cols", self.cols)] {
            if value < MIN_DIMENSION {
                return Err(EngineError::Configuration(format!(
                    "{name} must be at least {MIN_DIMENSION}, got {value}"
                )));
            }
            if value > MAX_DIMENSION {
                return Err(EngineError::Configuration(format!(
                    "{name} must be at most {MAX_DIMENSION}, got {value}"
                )));
            }
        }

        if self.target_value < 4 || !self.target_value.is_power_of_two() {
            return Err(EngineError::Configuration(format!(
                "target value must be a power of two >= 4, got {}",
                self.target_value
            )));
        }

        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(EngineError::Configuration(format!(
                "four probability must be within [0, 1], got {}",
                self.four_probability
            )));
        }

        Ok(())
    }
}
