//! # merge-grid
//!
//! Sliding-tile merge puzzle engine (the "2048" mechanic).
//!
//! ## Design Principles
//!
//! 1. **Single Owner**: The engine is the only arena owner. Tiles are indexed
//!    by ID, never by reference, and the view layer only ever receives owned
//!    snapshots.
//!
//! 2. **Deterministic**: All randomness flows through a seeded ChaCha8 RNG,
//!    so a seed plus a sequence of moves reproduces a game exactly.
//!
//! 3. **Configuration Over Convention**: Board size, winning tile and spawn
//!    odds come from `GridConfig`; nothing assumes a 4x4 board.
//!
//! ## Turn Flow
//!
//! An input adapter maps keys or swipes to a `Direction` and calls
//! `GridEngine::move_tiles`. The engine slides and merges, spawns a tile if
//! anything changed, updates score and status, and returns a `Snapshot`
//! whose per-tile hints (`is_new`, `is_merging`, `merged_from`, `origin`)
//! drive the animations.
//!
//! ## Modules
//!
//! - `core`: Positions, directions, tiles, RNG, configuration, errors
//! - `grid`: Tile arena and the slide/merge algorithm
//! - `engine`: `GridEngine`, snapshots, status and history

pub mod core;
pub mod grid;
pub mod engine;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Direction, Position,
    Tile, TileId, TileMark,
    GameRng, GridConfig,
    EngineError, Result,
};

pub use crate::grid::{Grid, MergeEvent, SlideOutcome};

pub use crate::engine::{
    GameStatus, GridEngine, MoveOutcome, MoveRecord, Snapshot, SpawnRecord, TileView,
};
