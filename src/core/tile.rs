//! Tile identity and per-turn animation marks.
//!
//! ## IDs
//!
//! Every tile on the board has a unique `TileId`. IDs are allocated by the
//! grid from a counter that restarts on reset, so they stay stable across
//! moves for the same physical tile and the view layer can animate a slide
//! instead of re-creating the tile.
//!
//! A merge consumes both source tiles and produces a new tile with a fresh
//! ID; its [`TileMark::Merged`] mark records where it came from.

use serde::{Deserialize, Serialize};

use super::position::Position;

/// Unique identifier for a tile on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u64);

impl TileId {
    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// What happened to a tile during the last turn.
///
/// Marks are animation hints. They are cleared at the start of every
/// state-changing move and carry no meaning for the game rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileMark {
    /// Nothing notable; the tile may still have slid (see `Tile::origin`).
    #[default]
    Settled,
    /// Spawned at the end of the turn.
    Spawned,
    /// Produced by combining two tiles this turn.
    Merged {
        /// `[stationary, moving]` source tiles, both gone now.
        from: [TileId; 2],
    },
}

/// A tile at rest on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    /// Power of two, at least 2.
    pub value: u64,
    pub position: Position,
    pub mark: TileMark,
    /// Where the tile started the turn, when it slid this turn.
    pub origin: Option<Position>,
}

impl Tile {
    /// Create a settled tile.
    #[must_use]
    pub fn new(id: TileId, value: u64, position: Position) -> Self {
        Self {
            id,
            value,
            position,
            mark: TileMark::Settled,
            origin: None,
        }
    }

    /// Was this tile spawned this turn?
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.mark == TileMark::Spawned
    }

    /// Was this tile produced by a merge this turn?
    #[must_use]
    pub fn is_merging(&self) -> bool {
        matches!(self.mark, TileMark::Merged { .. })
    }

    /// Source tiles of this turn's merge, if any.
    #[must_use]
    pub fn merged_from(&self) -> Option<[TileId; 2]> {
        match self.mark {
            TileMark::Merged { from } => Some(from),
            _ => None,
        }
    }

    /// Drop last turn's animation hints.
    pub fn clear_marks(&mut self) {
        self.mark = TileMark::Settled;
        self.origin = None;
    }
}

/// Is `value` a legal tile value (a power of two, at least 2)?
#[must_use]
pub const fn is_tile_value(value: u64) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// Largest value accepted on a starting board. One merge above it still
/// fits a `u64`.
pub const MAX_START_VALUE: u64 = 1 << 62;

/// Can two tiles of `value` merge without overflowing a `u64`?
///
/// Tiles at `2^63` are final: they slide but never merge.
#[must_use]
pub const fn can_merge(value: u64) -> bool {
    value.checked_mul(2).is_some()
}
