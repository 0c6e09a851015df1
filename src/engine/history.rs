//! Move history.
//!
//! Every `move_tiles` call on a playable game appends a `MoveRecord`,
//! illegal moves included, so an input adapter can tell "the key did
//! nothing" apart from "the key was never delivered". Once the game stops
//! accepting input nothing more is recorded. History lives in memory only
//! and is cleared by reset.

use serde::{Deserialize, Serialize};

use crate::core::position::{Direction, Position};
use crate::core::tile::TileId;

/// Tile added at the end of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnRecord {
    pub id: TileId,
    pub position: Position,
    pub value: u64,
}

/// One `move_tiles` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Turn counter after the call.
    pub turn: u32,
    pub direction: Direction,
    /// The board changed (and a tile was spawned if there was room).
    pub changed: bool,
    pub score_gained: u64,
    pub spawned: Option<SpawnRecord>,
}

impl MoveRecord {
    /// A call that left the board untouched.
    #[must_use]
    pub fn unchanged(turn: u32, direction: Direction) -> Self {
        Self {
            turn,
            direction,
            changed: false,
            score_gained: 0,
            spawned: None,
        }
    }
}
