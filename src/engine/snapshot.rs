//! Render-ready copies of the engine state.
//!
//! A `Snapshot` is fully owned: the view layer can keep, diff or ship it
//! anywhere without ever aliasing engine storage. Tiles are listed in
//! row-major order so two snapshots of the same state compare equal.

use serde::{Deserialize, Serialize};

use super::status::GameStatus;
use crate::core::position::Position;
use crate::core::tile::{Tile, TileId};
use crate::grid::Grid;

/// One tile as the view layer sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub id: TileId,
    pub value: u64,
    pub row: usize,
    pub col: usize,
    /// Spawned this turn.
    pub is_new: bool,
    /// Produced by a merge this turn.
    pub is_merging: bool,
    /// `[stationary, moving]` tiles this one was merged from.
    pub merged_from: Option<[TileId; 2]>,
    /// Cell the tile slid from this turn.
    pub origin: Option<Position>,
}

impl TileView {
    /// Current position of the tile.
    #[must_use]
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

impl From<&Tile> for TileView {
    fn from(tile: &Tile) -> Self {
        Self {
            id: tile.id,
            value: tile.value,
            row: tile.position.row,
            col: tile.position.col,
            is_new: tile.is_new(),
            is_merging: tile.is_merging(),
            merged_from: tile.merged_from(),
            origin: tile.origin,
        }
    }
}

/// Immutable copy of the board, score and status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: usize,
    pub cols: usize,
    /// Tiles in row-major order.
    pub tiles: Vec<TileView>,
    pub score: u64,
    pub status: GameStatus,
    /// Number of state-changing moves made so far.
    pub turn: u32,
}

impl Snapshot {
    /// Copy the state of `grid`.
    #[must_use]
    pub fn capture(grid: &Grid, score: u64, status: GameStatus, turn: u32) -> Self {
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            tiles: grid.tiles().map(TileView::from).collect(),
            score,
            status,
            turn,
        }
    }

    /// Board values as a matrix, 0 for empty cells.
    ///
    /// Tiles outside `rows` x `cols` (only possible in a hand-built or
    /// deserialized snapshot) are skipped.
    #[must_use]
    pub fn values(&self) -> Vec<Vec<u64>> {
        let mut values = vec![vec![0; self.cols]; self.rows];
        for tile in &self.tiles {
            if let Some(cell) = values.get_mut(tile.row).and_then(|row| row.get_mut(tile.col)) {
                *cell = tile.value;
            }
        }
        values
    }

    /// The tile at `(row, col)`, if any.
    #[must_use]
    pub fn tile_at(&self, row: usize, col: usize) -> Option<&TileView> {
        self.tiles.iter().find(|tile| tile.row == row && tile.col == col)
    }

    /// Look up a tile by ID.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&TileView> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    /// Tiles spawned this turn.
    pub fn new_tiles(&self) -> impl Iterator<Item = &TileView> + '_ {
        self.tiles.iter().filter(|tile| tile.is_new)
    }

    /// Tiles produced by merges this turn.
    pub fn merged_tiles(&self) -> impl Iterator<Item = &TileView> + '_ {
        self.tiles.iter().filter(|tile| tile.is_merging)
    }

    /// Largest tile value, 0 on an empty board.
    #[must_use]
    pub fn best_tile(&self) -> u64 {
        self.tiles.iter().map(|tile| tile.value).max().unwrap_or(0)
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn total_value(&self) -> u64 {
        self.tiles
            .iter()
            .fold(0u64, |sum, tile| sum.saturating_add(tile.value))
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "score: {}  status: {}  turn: {}", self.score, self.status, self.turn)?;
        crate::grid::render_values(f, &self.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Snapshot {
        let mut grid = Grid::from_values(2, 3, &[vec![2, 0, 4], vec![0, 8, 0]]).unwrap();
        if let Some(id) = grid.id_at(Position::new(1, 1)) {
            grid.mark_spawned(id);
        }
        Snapshot::capture(&grid, 12, GameStatus::Playing, 3)
    }

    #[test]
    fn test_capture() {
        let snap = sample();
        assert_eq!(snap.rows, 2);
        assert_eq!(snap.cols, 3);
        assert_eq!(snap.score, 12);
        assert_eq!(snap.turn, 3);
        assert_eq!(snap.tiles.len(), 3);
        assert_eq!(snap.values(), vec![vec![2, 0, 4], vec![0, 8, 0]]);

        // Row-major order
        let positions: Vec<_> = snap.tiles.iter().map(TileView::position).collect();
        assert_eq!(
            positions,
            vec![Position::new(0, 0), Position::new(0, 2), Position::new(1, 1)]
        );
    }

    #[test]
    fn test_lookups() {
        let snap = sample();
        let tile = snap.tile_at(0, 2).unwrap();
        assert_eq!(tile.value, 4);
        assert_eq!(snap.tile(tile.id), Some(tile));
        assert!(snap.tile_at(1, 0).is_none());

        assert_eq!(snap.best_tile(), 8);
        assert_eq!(snap.total_value(), 14);

        let new: Vec<_> = snap.new_tiles().map(|t| t.value).collect();
        assert_eq!(new, vec![8]);
        assert_eq!(snap.merged_tiles().count(), 0);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut grid = Grid::from_values(2, 2, &[vec![2, 2], vec![0, 0]]).unwrap();
        let before = Snapshot::capture(&grid, 0, GameStatus::Playing, 0);
        grid.slide(crate::core::Direction::Left);

        assert_eq!(before.values(), vec![vec![2, 2], vec![0, 0]]);
        assert_ne!(Snapshot::capture(&grid, 4, GameStatus::Playing, 1), before);
    }

    #[test]
    fn test_display() {
        let text = sample().to_string();
        assert!(text.starts_with("score: 12  status: playing  turn: 3"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_serialization() {
        let snap = sample();
        let json = serde_json::to_string(&snap).unwrap();
        let deserialized: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, deserialized);
    }

    #[test]
    fn test_values_skip_out_of_range_tiles() {
        let mut snap = sample();
        let mut stray = snap.tiles[0].clone();
        stray.row = 7;
        snap.tiles.push(stray);
        let mut stray = snap.tiles[0].clone();
        stray.col = 3;
        snap.tiles.push(stray);

        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.values(), vec![vec![2, 0, 4], vec![0, 8, 0]]);
        assert!(back.to_string().contains("score: 12"));
    }
}
