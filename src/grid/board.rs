//! Tile arena and cell occupancy.
//!
//! The `Grid` is the sole owner of every tile. Tiles live in an arena keyed
//! by [`TileId`]; `cells` maps each board position to at most one ID. Callers
//! outside the crate only ever see shared references or copies.
//!
//! ## Usage
//!
//! ```
//! use merge_grid::grid::Grid;
//! use merge_grid::core::Position;
//!
//! let grid = Grid::from_values(2, 2, &[vec![2, 0], vec![4, 2]]).unwrap();
//!
//! assert_eq!(grid.value_at(Position::new(1, 0)), 4);
//! assert_eq!(grid.empty_cells(), vec![Position::new(0, 1)]);
//! assert!(grid.has_moves());
//! ```

use rustc_hash::FxHashMap;

use crate::core::error::{EngineError, Result};
use crate::core::position::{Direction, Position};
use crate::core::tile::{can_merge, is_tile_value, Tile, TileId, TileMark, MAX_START_VALUE};

/// The authoritative board: dimensions, occupancy and the tile arena.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,

    /// Row-major occupancy: position index -> tile.
    cells: Vec<Option<TileId>>,

    /// Tile arena: tile_id -> tile.
    tiles: FxHashMap<TileId, Tile>,

    /// Next ID to hand out. IDs are never reused within a game.
    next_id: u64,
}

impl Grid {
    /// Create an empty `rows` x `cols` grid.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            tiles: FxHashMap::default(),
            next_id: 1,
        }
    }

    /// Build a grid from a matrix of values, 0 meaning empty.
    ///
    /// Tiles get IDs in row-major order.
    pub fn from_values(rows: usize, cols: usize, values: &[Vec<u64>]) -> Result<Self> {
        if values.len() != rows {
            return Err(EngineError::InvalidArgument(format!(
                "board has {} rows, expected {rows}",
                values.len()
            )));
        }

        let mut grid = Self::new(rows, cols);
        for (row, line) in values.iter().enumerate() {
            if line.len() != cols {
                return Err(EngineError::InvalidArgument(format!(
                    "board row {row} has {} cells, expected {cols}",
                    line.len()
                )));
            }
            for (col, &value) in line.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                if !is_tile_value(value) {
                    return Err(EngineError::InvalidArgument(format!(
                        "tile value {value} at ({row}, {col}) is not a power of two >= 2"
                    )));
                }
                if value > MAX_START_VALUE {
                    return Err(EngineError::InvalidArgument(format!(
                        "tile value {value} at ({row}, {col}) exceeds {MAX_START_VALUE}"
                    )));
                }
                grid.insert(value, Position::new(row, col));
            }
        }
        Ok(grid)
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Check if a position lies on the board.
    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// ID of the tile at a position, if any.
    #[must_use]
    pub fn id_at(&self, pos: Position) -> Option<TileId> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells[pos.index(self.cols)]
    }

    /// The tile at a position, if any.
    #[must_use]
    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self.id_at(pos).and_then(|id| self.tiles.get(&id))
    }

    /// Look up a tile by ID.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// Value at a position, 0 if empty.
    #[must_use]
    pub fn value_at(&self, pos: Position) -> u64 {
        self.tile_at(pos).map_or(0, |tile| tile.value)
    }

    /// Iterate tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells
            .iter()
            .filter_map(move |cell| cell.and_then(|id| self.tiles.get(&id)))
    }

    /// Number of tiles on the board.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Empty positions in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| Position::from_index(index, self.cols))
            .collect()
    }

    /// Check if every cell holds a tile.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Board values as a matrix, 0 for empty cells.
    #[must_use]
    pub fn values(&self) -> Vec<Vec<u64>> {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| self.value_at(Position::new(row, col)))
                    .collect()
            })
            .collect()
    }

    /// Largest tile value, 0 on an empty board.
    #[must_use]
    pub fn max_value(&self) -> u64 {
        self.tiles.values().map(|tile| tile.value).max().unwrap_or(0)
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn total_value(&self) -> u64 {
        self.tiles
            .values()
            .fold(0u64, |sum, tile| sum.saturating_add(tile.value))
    }

    /// Check if two orthogonally adjacent tiles could merge.
    #[must_use]
    pub fn has_adjacent_equal(&self) -> bool {
        self.tiles().any(|tile| {
            [Direction::Right, Direction::Down].into_iter().any(|dir| {
                tile.position
                    .step(dir, self.rows, self.cols)
                    .and_then(|next| self.tile_at(next))
                    .is_some_and(|other| other.value == tile.value && can_merge(tile.value))
            })
        })
    }

    /// Fast legal-move check: any empty cell, or any adjacent equal pair.
    ///
    /// Agrees with trying every direction (see [`Grid::can_move`]).
    #[must_use]
    pub fn has_moves(&self) -> bool {
        !self.is_full() || self.has_adjacent_equal()
    }

    /// Place a new settled tile. Returns `None` if the cell is taken or off
    /// the board.
    pub(crate) fn insert(&mut self, value: u64, pos: Position) -> Option<TileId> {
        if !self.in_bounds(pos) || self.id_at(pos).is_some() {
            return None;
        }
        let id = self.alloc_id();
        self.tiles.insert(id, Tile::new(id, value, pos));
        self.cells[pos.index(self.cols)] = Some(id);
        Some(id)
    }

    /// Mark a tile as spawned this turn.
    pub(crate) fn mark_spawned(&mut self, id: TileId) {
        if let Some(tile) = self.tiles.get_mut(&id) {
            tile.mark = TileMark::Spawned;
        }
    }

    /// Clear last turn's animation marks on every tile.
    pub(crate) fn clear_marks(&mut self) {
        for tile in self.tiles.values_mut() {
            tile.clear_marks();
        }
    }

    /// Empty a cell without touching the tile it held.
    ///
    /// The tile must be settled or merged again before the grid is observed.
    pub(crate) fn vacate(&mut self, pos: Position) -> Option<TileId> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells[pos.index(self.cols)].take()
    }

    /// Put a vacated tile down at `pos`, recording where it came from if it
    /// moved. Returns whether it moved.
    pub(crate) fn settle(&mut self, id: TileId, pos: Position) -> bool {
        let Some(tile) = self.tiles.get_mut(&id) else {
            return false;
        };
        let moved = tile.position != pos;
        if moved {
            tile.origin = Some(tile.position);
            tile.position = pos;
        }
        self.cells[pos.index(self.cols)] = Some(id);
        moved
    }

    /// Replace two vacated tiles with one merged tile of `value` at `pos`.
    pub(crate) fn merge(&mut self, sources: [TileId; 2], value: u64, pos: Position) -> TileId {
        for source in sources {
            self.tiles.remove(&source);
        }
        let id = self.alloc_id();
        let mut tile = Tile::new(id, value, pos);
        tile.mark = TileMark::Merged { from: sources };
        self.tiles.insert(id, tile);
        self.cells[pos.index(self.cols)] = Some(id);
        id
    }

    fn alloc_id(&mut self) -> TileId {
        let id = TileId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        super::render_values(f, &self.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(values: &[&[u64]]) -> Grid {
        let rows: Vec<Vec<u64>> = values.iter().map(|row| row.to_vec()).collect();
        Grid::from_values(rows.len(), rows[0].len(), &rows).unwrap()
    }

    #[test]
    fn test_from_values_layout() {
        let g = grid(&[&[2, 0, 4], &[0, 8, 0]]);
        assert_eq!(g.rows(), 2);
        assert_eq!(g.cols(), 3);
        assert_eq!(g.tile_count(), 3);
        assert_eq!(g.values(), vec![vec![2, 0, 4], vec![0, 8, 0]]);

        // Row-major ID allocation
        let ids: Vec<_> = g.tiles().map(|t| t.id).collect();
        assert_eq!(ids, vec![TileId(1), TileId(2), TileId(3)]);
    }

    #[test]
    fn test_from_values_rejects_bad_input() {
        let err = Grid::from_values(2, 2, &[vec![2, 2]]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));

        let err = Grid::from_values(2, 2, &[vec![2, 2], vec![2]]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));

        let err = Grid::from_values(2, 2, &[vec![2, 3], vec![0, 0]]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));

        let err = Grid::from_values(2, 2, &[vec![1, 0], vec![0, 0]]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));
    }

    #[test]
    fn test_from_values_caps_tile_values() {
        let err = Grid::from_values(2, 2, &[vec![1 << 63, 1 << 63], vec![0, 0]]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));

        let g = Grid::from_values(2, 2, &[vec![1 << 62, 1 << 62], vec![1 << 62, 1 << 62]]).unwrap();
        assert_eq!(g.max_value(), MAX_START_VALUE);
        assert_eq!(g.total_value(), u64::MAX);
        assert!(g.has_moves());
    }

    #[test]
    fn test_insert_rejects_occupied_and_out_of_bounds() {
        let mut g = Grid::new(2, 2);
        assert!(g.insert(2, Position::new(0, 0)).is_some());
        assert!(g.insert(4, Position::new(0, 0)).is_none());
        assert!(g.insert(4, Position::new(2, 0)).is_none());
        assert_eq!(g.tile_count(), 1);
    }

    #[test]
    fn test_lookup() {
        let g = grid(&[&[2, 4], &[0, 0]]);
        let tile = g.tile_at(Position::new(0, 1)).unwrap();
        assert_eq!(tile.value, 4);
        assert_eq!(g.tile(tile.id).unwrap().position, Position::new(0, 1));
        assert!(g.tile_at(Position::new(1, 1)).is_none());
        assert!(g.tile_at(Position::new(5, 5)).is_none());
        assert_eq!(g.value_at(Position::new(1, 0)), 0);
    }

    #[test]
    fn test_empty_cells_and_fullness() {
        let g = grid(&[&[2, 0], &[0, 4]]);
        assert_eq!(g.empty_cells(), vec![Position::new(0, 1), Position::new(1, 0)]);
        assert!(!g.is_full());

        let full = grid(&[&[2, 4], &[8, 16]]);
        assert!(full.empty_cells().is_empty());
        assert!(full.is_full());
    }

    #[test]
    fn test_aggregates() {
        let g = grid(&[&[2, 4], &[0, 32]]);
        assert_eq!(g.max_value(), 32);
        assert_eq!(g.total_value(), 38);
        assert_eq!(Grid::new(3, 3).max_value(), 0);
    }

    #[test]
    fn test_has_moves() {
        // Empty cell: always movable
        assert!(grid(&[&[2, 4], &[8, 0]]).has_moves());

        // Full, no equal neighbours
        let stuck = grid(&[&[2, 4], &[4, 2]]);
        assert!(!stuck.has_adjacent_equal());
        assert!(!stuck.has_moves());

        // Full, horizontal pair
        assert!(grid(&[&[2, 2], &[4, 8]]).has_moves());

        // Full, vertical pair
        assert!(grid(&[&[2, 4], &[2, 8]]).has_moves());

        // Diagonal equals don't count
        assert!(!grid(&[&[2, 4, 8], &[4, 2, 4], &[8, 4, 2]]).has_moves());
    }

    #[test]
    fn test_vacate_settle_records_origin() {
        let mut g = grid(&[&[0, 2], &[0, 0]]);
        let id = g.vacate(Position::new(0, 1)).unwrap();
        assert!(g.settle(id, Position::new(0, 0)));

        let tile = g.tile(id).unwrap();
        assert_eq!(tile.position, Position::new(0, 0));
        assert_eq!(tile.origin, Some(Position::new(0, 1)));
        assert_eq!(g.values(), vec![vec![2, 0], vec![0, 0]]);

        // Settling in place is not a move
        let id = g.vacate(Position::new(0, 0)).unwrap();
        g.clear_marks();
        assert!(!g.settle(id, Position::new(0, 0)));
        assert_eq!(g.tile(id).unwrap().origin, None);
    }

    #[test]
    fn test_merge_replaces_sources() {
        let mut g = grid(&[&[2, 2]]);
        let a = g.vacate(Position::new(0, 0)).unwrap();
        let b = g.vacate(Position::new(0, 1)).unwrap();
        let merged = g.merge([a, b], 4, Position::new(0, 0));

        assert_ne!(merged, a);
        assert_ne!(merged, b);
        assert!(g.tile(a).is_none());
        assert!(g.tile(b).is_none());
        assert_eq!(g.tile_count(), 1);

        let tile = g.tile(merged).unwrap();
        assert_eq!(tile.value, 4);
        assert_eq!(tile.merged_from(), Some([a, b]));
        assert_eq!(g.values(), vec![vec![4, 0]]);
    }

    #[test]
    fn test_display() {
        let g = grid(&[&[2, 0], &[0, 1024]]);
        let rendered = g.to_string();
        assert!(rendered.contains("1024"));
        assert!(rendered.contains('.'));
        assert_eq!(rendered.lines().count(), 2);
    }
}
