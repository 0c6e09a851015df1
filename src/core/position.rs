//! Board coordinates and move directions.
//!
//! ## Direction vocabulary
//!
//! Input adapters speak in different dialects: keyboard handlers report DOM
//! key names (`"ArrowLeft"`), touch handlers report swipe names (`"left"`),
//! and the front end stores directions as small integer codes
//! (`Left = 0, Right = 1, Up = 2, Down = 3`). All of them parse into
//! [`Direction`]; anything else is rejected with
//! [`EngineError::InvalidArgument`].
//!
//! ```
//! use merge_grid::core::Direction;
//!
//! assert_eq!("ArrowUp".parse::<Direction>().unwrap(), Direction::Up);
//! assert_eq!(Direction::try_from(1u8).unwrap(), Direction::Right);
//! assert!("north".parse::<Direction>().is_err());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// A cell coordinate, `(row, col)`, zero-based from the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index of this position in a grid `cols` wide.
    #[must_use]
    pub const fn index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    /// Inverse of [`Position::index`].
    #[must_use]
    pub const fn from_index(index: usize, cols: usize) -> Self {
        Self {
            row: index / cols,
            col: index % cols,
        }
    }

    /// Neighbouring position one step in `direction`, if it stays inside a
    /// `rows` x `cols` grid.
    #[must_use]
    pub fn step(self, direction: Direction, rows: usize, cols: usize) -> Option<Self> {
        let (dr, dc) = direction.vector();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < rows && col < cols).then_some(Self { row, col })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four canonical move directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions, in front-end code order.
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    /// Unit vector `(dr, dc)` of this direction.
    #[must_use]
    pub const fn vector(self) -> (isize, isize) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }

    /// Front-end numeric code of this direction.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }

    /// Whether tiles travel along rows (`Left`/`Right`).
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Cells of line `line` in travel order, leading edge first.
    ///
    /// Lines are rows for horizontal moves and columns for vertical ones.
    pub fn line_positions(self, line: usize, rows: usize, cols: usize) -> impl Iterator<Item = Position> {
        let len = if self.is_horizontal() { cols } else { rows };
        (0..len).map(move |k| match self {
            Direction::Left => Position::new(line, k),
            Direction::Right => Position::new(line, cols - 1 - k),
            Direction::Up => Position::new(k, line),
            Direction::Down => Position::new(rows - 1 - k, line),
        })
    }

    /// Number of lines a move in this direction processes.
    #[must_use]
    pub const fn line_count(self, rows: usize, cols: usize) -> usize {
        if self.is_horizontal() {
            rows
        } else {
            cols
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

impl TryFrom<u8> for Direction {
    type Error = EngineError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::Left),
            1 => Ok(Direction::Right),
            2 => Ok(Direction::Up),
            3 => Ok(Direction::Down),
            other => Err(EngineError::InvalidArgument(format!("unknown direction code {other}"))),
        }
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    /// Accepts direction names (case-insensitive) and DOM arrow key names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "arrowleft" => Ok(Direction::Left),
            "right" | "arrowright" => Ok(Direction::Right),
            "up" | "arrowup" => Ok(Direction::Up),
            "down" | "arrowdown" => Ok(Direction::Down),
            _ => Err(EngineError::InvalidArgument(format!("unknown direction {s:?}"))),
        }
    }
}
