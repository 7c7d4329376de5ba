//! Draw detection logic for four-in-a-row.

use crate::grid::Grid;

/// Checks if the grid is full (no empty cell anywhere).
///
/// A full grid with no winner indicates a draw.
pub fn is_full(grid: &Grid) -> bool {
    grid.columns().iter().flatten().all(|t| !t.is_empty())
}
