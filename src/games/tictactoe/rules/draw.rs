//! Draw detection logic for tic-tac-toe.

use super::super::{Cell, Grid};
use tracing::instrument;

/// Checks if every cell holds a mark.
///
/// A full grid with no winner indicates a draw.
#[instrument(skip(grid))]
pub fn is_full(grid: &Grid) -> bool {
    grid.iter().flatten().all(|cell| *cell != Cell::Empty)
}
