//! The game engine and what it reports to the view layer.
//!
//! ## Key Types
//!
//! - `GridEngine`: Owns the board; `reset` and `move_tiles` are the only
//!   mutations
//! - `Snapshot` / `TileView`: Owned, render-ready copies of the state
//! - `MoveOutcome`: Snapshot plus whether the move changed anything
//! - `GameStatus`: Playing, Won (sticky) or Lost
//! - `MoveRecord`: Per-call history entry

pub mod game;
pub mod history;
pub mod snapshot;
pub mod status;

pub use game::{GridEngine, MoveOutcome};
pub use history::{MoveRecord, SpawnRecord};
pub use snapshot::{Snapshot, TileView};
pub use status::GameStatus;
