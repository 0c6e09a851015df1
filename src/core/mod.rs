//! Core engine types: positions, directions, tiles, RNG, configuration, errors.
//!
//! This module contains the building blocks shared by the grid and the
//! engine. None of it owns game state.

pub mod position;
pub mod tile;
pub mod rng;
pub mod config;
pub mod error;

pub use position::{Direction, Position};
pub use tile::{can_merge, is_tile_value, Tile, TileId, TileMark, MAX_START_VALUE};
pub use rng::GameRng;
pub use config::{GridConfig, MAX_DIMENSION, MIN_DIMENSION};
pub use error::{EngineError, Result};
