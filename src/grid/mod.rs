//! Board storage and the slide/merge algorithm.
//!
//! ## Key Types
//!
//! - `Grid`: Tile arena plus cell occupancy; sole owner of tiles
//! - `SlideOutcome` / `MergeEvent`: What a slide did, for scoring and hints
//! - `slide_values`: Value-only line slide used for legality checks

pub mod board;
pub mod slide;

pub use board::Grid;
pub use slide::{slide_values, MergeEvent, SlideOutcome};

/// Render a value matrix as fixed-width text, `.` for empty cells.
pub(crate) fn render_values(f: &mut std::fmt::Formatter<'_>, values: &[Vec<u64>]) -> std::fmt::Result {
    let width = values
        .iter()
        .flatten()
        .map(|v| v.to_string().len())
        .max()
        .unwrap_or(1)
        .max(1);

    for (row, line) in values.iter().enumerate() {
        if row > 0 {
            writeln!(f)?;
        }
        for (col, &value) in line.iter().enumerate() {
            if col > 0 {
                write!(f, " ")?;
            }
            if value == 0 {
                write!(f, "{:>width$}", ".")?;
            } else {
                write!(f, "{value:>width$}")?;
            }
        }
    }
    Ok(())
}
