//! Python bindings for the merge-grid engine.
//!
//! Lets scripts and agents drive games without the web front end.
//!
//! # Quick Start
//!
//! ```python
//! import merge_grid
//!
//! game = merge_grid.GridEngine(rows=4, cols=4, seed=42)
//!
//! while game.legal_moves():
//!     game.move(game.legal_moves()[0])
//!
//! print(game.score, game.status)
//! print(game.board())  # numpy array, 0 = empty
//! ```

use pyo3::prelude::*;

mod py_engine;

pub use py_engine::*;

/// merge_grid: sliding-tile merge puzzle engine.
#[pymodule]
fn merge_grid(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGridEngine>()?;
    Ok(())
}
