//! Engine bindings for Python.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{Direction, EngineError, GridConfig};
use crate::engine::GridEngine;

fn to_py_err(err: EngineError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python wrapper for GridEngine.
#[pyclass(name = "GridEngine")]
pub struct PyGridEngine {
    inner: GridEngine,
}

#[pymethods]
impl PyGridEngine {
    /// Start a new game.
    ///
    /// # Arguments
    /// - rows, cols: Board dimensions (2-16)
    /// - target_value: Winning tile (power of two >= 4)
    /// - seed: RNG seed; random when omitted
    /// - four_probability: Chance that a spawned tile is a 4
    /// - continue_after_win: Keep accepting moves after a win
    #[new]
    #[pyo3(signature = (
        rows = 4,
        cols = 4,
        target_value = 2048,
        seed = None,
        four_probability = 0.1,
        continue_after_win = true
    ))]
    fn new(
        rows: usize,
        cols: usize,
        target_value: u64,
        seed: Option<u64>,
        four_probability: f64,
        continue_after_win: bool,
    ) -> PyResult<Self> {
        let config = GridConfig {
            rows,
            cols,
            target_value,
            seed,
            four_probability,
            continue_after_win,
        };
        let inner = GridEngine::new(config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Move in a direction ("left", "ArrowUp", ...).
    ///
    /// Returns whether the board changed.
    #[pyo3(name = "move")]
    fn move_tiles(&mut self, direction: &str) -> PyResult<bool> {
        let outcome = self.inner.move_named(direction).map_err(to_py_err)?;
        Ok(outcome.changed)
    }

    /// Start over with the same rules, optionally with a new seed.
    #[pyo3(signature = (seed = None))]
    fn reset(&mut self, seed: Option<u64>) -> PyResult<()> {
        let mut config = self.inner.config().clone();
        config.seed = seed;
        self.inner.reset(config).map_err(to_py_err)?;
        Ok(())
    }

    /// Names of the directions that would change the board.
    fn legal_moves(&self) -> Vec<String> {
        self.inner
            .legal_moves()
            .into_iter()
            .map(|dir: Direction| dir.to_string())
            .collect()
    }

    /// Board values as a [rows, cols] uint64 array, 0 for empty cells.
    fn board<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<u64>>> {
        let (rows, cols) = (self.inner.config().rows, self.inner.config().cols);
        let flat: Vec<u64> = self.inner.grid().values().into_iter().flatten().collect();
        PyArray1::from_vec_bound(py, flat)
            .reshape([rows, cols])
            .map_err(|e| PyErr::new::<PyValueError, _>(format!("{}", e)))
    }

    /// Tiles as (id, value, row, col, is_new, is_merging) tuples.
    fn tiles(&self) -> Vec<(u64, u64, usize, usize, bool, bool)> {
        self.inner
            .snapshot()
            .tiles
            .iter()
            .map(|t| (t.id.raw(), t.value, t.row, t.col, t.is_new, t.is_merging))
            .collect()
    }

    #[getter]
    fn score(&self) -> u64 {
        self.inner.score()
    }

    /// "playing", "won" or "lost".
    #[getter]
    fn status(&self) -> String {
        self.inner.status().to_string()
    }

    #[getter]
    fn turn(&self) -> u32 {
        self.inner.turn()
    }

    #[getter]
    fn best_tile(&self) -> u64 {
        self.inner.best_tile()
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.inner.seed()
    }

    /// No further move can change anything.
    fn is_over(&self) -> bool {
        self.inner.is_over()
    }

    /// Copy the game for look-ahead.
    fn copy(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "GridEngine({}x{}, score={}, status={}, turn={})",
            self.inner.config().rows,
            self.inner.config().cols,
            self.inner.score(),
            self.inner.status(),
            self.inner.turn()
        )
    }

    fn __str__(&self) -> String {
        self.inner.snapshot().to_string()
    }
}
