//! The game engine: owns the board and drives turns.
//!
//! ## Turn structure
//!
//! 1. Reject the move if the game no longer accepts input; nothing is
//!    recorded in the history.
//! 2. Slide a working copy of the grid (last turn's marks cleared first).
//! 3. If nothing changed, keep the current state, re-check for a loss and
//!    report `changed == false`. No tile is spawned, no ID is consumed and
//!    the RNG does not advance.
//! 4. Otherwise adopt the copy, add merge points to the score, spawn one
//!    tile and re-evaluate the status.
//!
//! ## Usage
//!
//! ```
//! use merge_grid::{Direction, GameStatus, GridConfig, GridEngine};
//!
//! let config = GridConfig::new(4, 4).with_seed(7);
//! let mut engine = GridEngine::with_board(
//!     config,
//!     &[vec![2, 2, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]],
//! )
//! .unwrap();
//!
//! let outcome = engine.move_tiles(Direction::Left);
//! assert!(outcome.changed);
//! assert_eq!(outcome.snapshot.score, 4);
//! assert_eq!(outcome.snapshot.status, GameStatus::Playing);
//! ```

use im::Vector;
use log::{debug, trace};

use super::history::{MoveRecord, SpawnRecord};
use super::snapshot::Snapshot;
use super::status::GameStatus;
use crate::core::config::GridConfig;
use crate::core::error::Result;
use crate::core::position::Direction;
use crate::core::rng::GameRng;
use crate::grid::Grid;

/// Number of tiles placed by a reset on boards with room for them.
const OPENING_TILES: usize = 2;

/// What a `move_tiles` call did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The board changed. `false` for illegal moves and finished games.
    pub changed: bool,
    /// Points scored by merges this move.
    pub score_gained: u64,
    /// State after the call.
    pub snapshot: Snapshot,
}

/// Authoritative state of one game.
///
/// Mutation goes through `&mut self` only (`reset`, `move_tiles`); readers
/// receive owned [`Snapshot`]s.
#[derive(Clone, Debug)]
pub struct GridEngine {
    config: GridConfig,
    grid: Grid,
    rng: GameRng,
    score: u64,
    status: GameStatus,
    turn: u32,
    history: Vector<MoveRecord>,
}

impl GridEngine {
    /// Start a game with random opening tiles.
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;
        let mut engine = Self::blank(config);
        engine.spawn_opening();
        Ok(engine)
    }

    /// Start a game from a given board instead of random opening tiles.
    ///
    /// `values` is a `rows` x `cols` matrix, 0 for empty cells. Spawns after
    /// the first move still come from the configured seed.
    pub fn with_board(config: GridConfig, values: &[Vec<u64>]) -> Result<Self> {
        config.validate()?;
        let grid = Grid::from_values(config.rows, config.cols, values)?;
        let mut engine = Self::blank(config);
        engine.grid = grid;
        engine.evaluate_status();
        Ok(engine)
    }

    /// Replace the current game with a fresh one.
    ///
    /// An invalid config leaves the current game untouched.
    pub fn reset(&mut self, config: GridConfig) -> Result<Snapshot> {
        config.validate()?;
        *self = Self::blank(config);
        self.spawn_opening();
        Ok(self.snapshot())
    }

    /// Slide all tiles toward `direction`.
    ///
    /// Never fails: an illegal move, or any move once the game stopped
    /// accepting input, returns `changed == false` and the current state.
    pub fn move_tiles(&mut self, direction: Direction) -> MoveOutcome {
        if !self.is_playable() {
            debug!("move {direction} ignored: game is {}", self.status);
            return self.unchanged();
        }

        let mut next = self.grid.clone();
        next.clear_marks();
        let slide = next.slide(direction);

        if !slide.changed() {
            debug!("move {direction} is illegal on the current board");
            self.evaluate_status();
            self.history.push_back(MoveRecord::unchanged(self.turn, direction));
            return self.unchanged();
        }

        self.grid = next;
        self.score = self.score.saturating_add(slide.score_gained);
        self.turn += 1;
        let spawned = self.spawn();
        self.evaluate_status();

        self.history.push_back(MoveRecord {
            turn: self.turn,
            direction,
            changed: true,
            score_gained: slide.score_gained,
            spawned,
        });

        MoveOutcome {
            changed: true,
            score_gained: slide.score_gained,
            snapshot: self.snapshot(),
        }
    }

    /// Parse a direction or arrow-key name and move.
    ///
    /// Unknown names are a caller bug and fail with `InvalidArgument`.
    pub fn move_named(&mut self, name: &str) -> Result<MoveOutcome> {
        let direction: Direction = name.parse()?;
        Ok(self.move_tiles(direction))
    }

    /// Move by front-end direction code (`Left = 0, Right = 1, Up = 2,
    /// Down = 3`).
    pub fn move_code(&mut self, code: u8) -> Result<MoveOutcome> {
        let direction = Direction::try_from(code)?;
        Ok(self.move_tiles(direction))
    }

    /// Owned copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.grid, self.score, self.status, self.turn)
    }

    /// Read-only view of the board.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Seed driving spawns, including one drawn because the config had none.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of state-changing moves since the last reset.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Largest tile on the board.
    #[must_use]
    pub fn best_tile(&self) -> u64 {
        self.grid.max_value()
    }

    /// Every `move_tiles` call on a playable game since the last reset,
    /// oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Would a move in `direction` change the board?
    #[must_use]
    pub fn can_move(&self, direction: Direction) -> bool {
        self.grid.can_move(direction)
    }

    /// Directions that would change the board, in `Direction::ALL` order.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Direction> {
        self.grid.legal_moves()
    }

    /// Does the game accept moves?
    ///
    /// True while playing, and after a win when the config allows play to
    /// continue.
    #[must_use]
    pub fn is_playable(&self) -> bool {
        match self.status {
            GameStatus::Playing => true,
            GameStatus::Won => self.config.continue_after_win,
            GameStatus::Lost => false,
        }
    }

    /// No further move can change anything.
    #[must_use]
    pub fn is_over(&self) -> bool {
        !self.is_playable() || !self.grid.has_moves()
    }

    fn blank(config: GridConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        debug!(
            "new {}x{} game, target {}, seed {}",
            config.rows,
            config.cols,
            config.target_value,
            rng.seed()
        );

        Self {
            grid: Grid::new(config.rows, config.cols),
            config,
            rng,
            score: 0,
            status: GameStatus::Playing,
            turn: 0,
            history: Vector::new(),
        }
    }

    fn spawn_opening(&mut self) {
        let count = OPENING_TILES.min(self.config.cell_count());
        for _ in 0..count {
            self.spawn();
        }
        self.evaluate_status();
    }

    /// Drop a 2 (or, with `four_probability`, a 4) into a random empty cell.
    fn spawn(&mut self) -> Option<SpawnRecord> {
        let empty = self.grid.empty_cells();
        let position = *self.rng.choose(&empty)?;
        let value = if self.rng.gen_bool(self.config.four_probability) {
            4
        } else {
            2
        };

        let id = self.grid.insert(value, position)?;
        self.grid.mark_spawned(id);
        trace!("spawned {value} at {position}");

        Some(SpawnRecord { id, position, value })
    }

    fn evaluate_status(&mut self) {
        let next = match self.status {
            GameStatus::Won => GameStatus::Won,
            _ if self.grid.max_value() >= self.config.target_value => GameStatus::Won,
            _ if !self.grid.has_moves() => GameStatus::Lost,
            _ => GameStatus::Playing,
        };

        if next != self.status {
            debug!("status {} -> {} at turn {}, score {}", self.status, next, self.turn, self.score);
            self.status = next;
        }
    }

    fn unchanged(&self) -> MoveOutcome {
        MoveOutcome {
            changed: false,
            score_gained: 0,
            snapshot: self.snapshot(),
        }
    }
}
