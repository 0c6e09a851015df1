//! Game status.

use serde::{Deserialize, Serialize};

/// Where a game stands between moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are accepted.
    #[default]
    Playing,
    /// A tile reached the target value. Sticky for the rest of the game.
    Won,
    /// No direction changes the board.
    Lost,
}

impl GameStatus {
    /// Check if the target has been reached.
    #[must_use]
    pub fn is_won(self) -> bool {
        self == GameStatus::Won
    }

    /// Check if the game ended without reaching the target.
    #[must_use]
    pub fn is_lost(self) -> bool {
        self == GameStatus::Lost
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        };
        f.write_str(name)
    }
}
