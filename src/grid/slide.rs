//! The slide/merge algorithm.
//!
//! A move processes every line parallel to the direction independently.
//! Within a line, tiles are taken in travel order (leading edge first) and
//! packed toward the leading edge. A tile that lands next to an equal tile
//! which has not merged yet this turn combines with it; a merged tile never
//! merges again in the same move, so `[2, 2, 2]` becomes `[4, 2]` and
//! `[2, 2, 2, 2]` becomes `[4, 4]`. Tiles at `2^63` never merge, and the
//! score gained saturates at `u64::MAX`.
//!
//! Two entry points share these rules:
//! - [`slide_values`] works on plain values and backs legality checks.
//! - [`Grid::slide`] moves the real tiles, keeping IDs stable and marking
//!   merged tiles for the view layer.

use smallvec::SmallVec;

use super::board::Grid;
use crate::core::position::{Direction, Position};
use crate::core::tile::{can_merge, TileId};

/// Inline capacity for per-line buffers; lines never exceed
/// `MAX_DIMENSION` cells.
type LineBuf<T> = SmallVec<[T; 16]>;

/// One merge performed during a slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeEvent {
    /// The tile produced by the merge.
    pub result: TileId,
    /// `[stationary, moving]` tiles consumed by the merge.
    pub sources: [TileId; 2],
    /// Value of the produced tile.
    pub value: u64,
    /// Where the produced tile sits.
    pub position: Position,
}

/// Result of sliding a grid in one direction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlideOutcome {
    /// Some tile ended up on a different cell.
    pub moved: bool,
    /// Merges in line order, leading edge first.
    pub merges: SmallVec<[MergeEvent; 4]>,
    /// Sum of the values produced by merges.
    pub score_gained: u64,
}

impl SlideOutcome {
    /// Did the board (positions or values) change?
    #[must_use]
    pub fn changed(&self) -> bool {
        self.moved || !self.merges.is_empty()
    }
}

/// A tile's destination slot within a line.
struct Slot {
    id: TileId,
    value: u64,
    /// Set once the slot holds a merge result; it cannot merge again.
    merged_from: Option<[TileId; 2]>,
}

/// Slide one line of values toward index 0.
///
/// `line` is given leading edge first, with 0 for empty cells. Returns the
/// packed line (same length, zero padded) and the score gained.
///
/// ```
/// use merge_grid::grid::slide_values;
///
/// let (packed, score) = slide_values(&[2, 2, 2, 0]);
/// assert_eq!(packed.as_slice(), &[4, 2, 0, 0]);
/// assert_eq!(score, 4);
/// ```
#[must_use]
pub fn slide_values(line: &[u64]) -> (SmallVec<[u64; 16]>, u64) {
    // (value, merged this turn)
    let mut slots: LineBuf<(u64, bool)> = SmallVec::with_capacity(line.len());
    let mut score = 0u64;

    for &value in line.iter().filter(|&&v| v != 0) {
        match slots.last_mut() {
            Some((last, merged)) if !*merged && *last == value && can_merge(value) => {
                *last *= 2;
                *merged = true;
                score = score.saturating_add(*last);
            }
            _ => slots.push((value, false)),
        }
    }

    let mut packed: LineBuf<u64> = slots.iter().map(|&(value, _)| value).collect();
    packed.resize(line.len(), 0);
    (packed, score)
}

impl Grid {
    /// Slide and merge every line toward `direction`'s leading edge.
    ///
    /// Only positions, IDs and merge marks change; the caller clears
    /// last turn's marks beforehand and decides what to do when nothing
    /// changed.
    pub fn slide(&mut self, direction: Direction) -> SlideOutcome {
        let (rows, cols) = (self.rows(), self.cols());
        let mut outcome = SlideOutcome::default();

        for line in 0..direction.line_count(rows, cols) {
            let cells: LineBuf<Position> = direction.line_positions(line, rows, cols).collect();

            let mut slots: LineBuf<Slot> = SmallVec::new();
            for &pos in &cells {
                let Some(tile) = self.tile_at(pos) else {
                    continue;
                };
                let (id, value) = (tile.id, tile.value);

                match slots.last_mut() {
                    Some(last)
                        if last.merged_from.is_none() && last.value == value && can_merge(value) =>
                    {
                        last.merged_from = Some([last.id, id]);
                        last.value *= 2;
                    }
                    _ => slots.push(Slot {
                        id,
                        value,
                        merged_from: None,
                    }),
                }
            }

            if slots.is_empty() {
                continue;
            }

            for &pos in &cells {
                self.vacate(pos);
            }

            for (slot, &pos) in slots.iter().zip(cells.iter()) {
                match slot.merged_from {
                    Some(sources) => {
                        let result = self.merge(sources, slot.value, pos);
                        outcome.score_gained = outcome.score_gained.saturating_add(slot.value);
                        outcome.merges.push(MergeEvent {
                            result,
                            sources,
                            value: slot.value,
                            position: pos,
                        });
                    }
                    None => {
                        outcome.moved |= self.settle(slot.id, pos);
                    }
                }
            }
        }

        outcome
    }

    /// Would sliding toward `direction` change the board?
    ///
    /// Simulates on values only; the grid is untouched.
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        let (rows, cols) = (self.rows(), self.cols());
        (0..direction.line_count(rows, cols)).any(|line| {
            let values: LineBuf<u64> = direction
                .line_positions(line, rows, cols)
                .map(|pos| self.value_at(pos))
                .collect();
            let (packed, _) = slide_values(&values);
            packed != values
        })
    }

    /// Legal directions, in `Direction::ALL` order.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&dir| self.can_move(dir))
            .collect()
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
    fn test_slide_values_basic() {
        assert_eq!(slide_values(&[0, 0, 2, 0]).0.as_slice(), &[2, 0, 0, 0]);
        assert_eq!(slide_values(&[2, 0, 2, 0]).0.as_slice(), &[4, 0, 0, 0]);
        assert_eq!(slide_values(&[2, 4, 8, 16]).0.as_slice(), &[2, 4, 8, 16]);
        assert_eq!(slide_values(&[0, 0, 0, 0]), (SmallVec::from_slice(&[0, 0, 0, 0]), 0));
    }

    #[test]
    fn test_slide_values_no_triple_merge() {
        let (packed, score) = slide_values(&[2, 2, 2]);
        assert_eq!(packed.as_slice(), &[4, 2, 0]);
        assert_eq!(score, 4);
    }

    #[test]
    fn test_slide_values_pairs() {
        let (packed, score) = slide_values(&[2, 2, 2, 2]);
        assert_eq!(packed.as_slice(), &[4, 4, 0, 0]);
        assert_eq!(score, 8);

        let (packed, score) = slide_values(&[4, 4, 8, 0]);
        assert_eq!(packed.as_slice(), &[8, 8, 0, 0]);
        assert_eq!(score, 8);
    }

    #[test]
    fn test_slide_values_overflow_cap() {
        let big = 1u64 << 62;
        let (packed, score) = slide_values(&[big, big, big, big]);
        assert_eq!(packed.as_slice(), &[big * 2, big * 2, 0, 0]);
        assert_eq!(score, u64::MAX);

        let top = 1u64 << 63;
        let (packed, score) = slide_values(&[top, top, 0]);
        assert_eq!(packed.as_slice(), &[top, top, 0]);
        assert_eq!(score, 0);
    }

    #[test]
    fn test_slide_huge_tiles_stop_merging() {
        let big = 1u64 << 62;
        let mut g = grid(&[&[big, big, big, big]]);
        let outcome = g.slide(Direction::Left);
        assert_eq!(g.values(), vec![vec![big * 2, big * 2, 0, 0]]);
        assert_eq!(outcome.merges.len(), 2);
        assert_eq!(outcome.score_gained, u64::MAX);

        // Two 2^63 tiles side by side are final
        assert!(!g.can_move(Direction::Left));
        let outcome = g.slide(Direction::Left);
        assert!(!outcome.changed());
        assert!(g.tiles().all(|t| t.value.is_power_of_two()));
        assert!(g.has_moves());
        assert!(g.can_move(Direction::Right));
    }

    #[test]
    fn test_slide_left_merges_leading_pair() {
        let mut g = grid(&[&[2, 2, 2, 0]]);
        let ids: Vec<_> = g.tiles().map(|t| t.id).collect();

        let outcome = g.slide(Direction::Left);
        assert!(outcome.changed());
        assert_eq!(outcome.score_gained, 4);
        assert_eq!(outcome.merges.len(), 1);
        assert_eq!(outcome.merges[0].sources, [ids[0], ids[1]]);
        assert_eq!(outcome.merges[0].position, Position::new(0, 0));
        assert_eq!(g.values(), vec![vec![4, 2, 0, 0]]);

        // Third tile keeps its identity and records the slide
        let third = g.tile(ids[2]).unwrap();
        assert_eq!(third.position, Position::new(0, 1));
        assert_eq!(third.origin, Some(Position::new(0, 2)));
        assert!(!third.is_merging());
    }

    #[test]
    fn test_slide_right_merges_from_right_edge() {
        let mut g = grid(&[&[2, 2, 2, 0]]);
        let outcome = g.slide(Direction::Right);
        assert_eq!(g.values(), vec![vec![0, 0, 2, 4]]);
        assert_eq!(outcome.score_gained, 4);
    }

    #[test]
    fn test_slide_vertical() {
        let mut g = grid(&[&[2, 0], &[2, 4], &[0, 4]]);
        let outcome = g.slide(Direction::Up);
        assert_eq!(g.values(), vec![vec![4, 8], vec![0, 0], vec![0, 0]]);
        assert_eq!(outcome.score_gained, 12);

        let mut g = grid(&[&[2, 0], &[2, 4], &[0, 4]]);
        g.slide(Direction::Down);
        assert_eq!(g.values(), vec![vec![0, 0], vec![0, 0], vec![4, 8]]);
    }

    #[test]
    fn test_merged_tile_does_not_merge_again() {
        // 4 produced by 2+2 must not absorb the following 4
        let mut g = grid(&[&[2, 2, 4, 0]]);
        g.slide(Direction::Left);
        assert_eq!(g.values(), vec![vec![4, 4, 0, 0]]);
    }

    #[test]
    fn test_blocked_line_is_unchanged() {
        let mut g = grid(&[&[2, 4, 8, 16]]);
        let before: Vec<_> = g.tiles().cloned().collect();
        let outcome = g.slide(Direction::Left);

        assert!(!outcome.changed());
        assert_eq!(outcome.score_gained, 0);
        let after: Vec<_> = g.tiles().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_can_move_matches_slide() {
        let boards: [&[&[u64]]; 4] = [
            &[&[2, 0], &[0, 0]],
            &[&[2, 4], &[4, 2]],
            &[&[2, 2], &[4, 8]],
            &[&[0, 0, 2], &[0, 0, 4], &[0, 0, 8]],
        ];

        for board in boards {
            let g = grid(board);
            for dir in Direction::ALL {
                let mut copy = g.clone();
                let outcome = copy.slide(dir);
                assert_eq!(g.can_move(dir), outcome.changed(), "{board:?} {dir}");
                assert_eq!(outcome.changed(), copy.values() != g.values());
            }
        }
    }

    #[test]
    fn test_legal_moves() {
        let g = grid(&[&[0, 0, 2], &[0, 0, 4], &[0, 0, 8]]);
        assert_eq!(g.legal_moves(), vec![Direction::Left]);

        assert!(grid(&[&[2, 4], &[4, 2]]).legal_moves().is_empty());
    }
}
