//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Grid`]. They never mutate state; the live game
//! applies whatever they report.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, winning_mark};

use super::{Grid, Mark, Outcome, Seat};
use tracing::{debug, instrument};

/// Evaluates a grid right after a move.
///
/// A winning mark equal to `player1`'s belongs to seat 1, any other to seat 2.
#[instrument(skip(grid))]
pub fn evaluate(grid: &Grid, player1: Mark) -> Outcome {
    let outcome = match winning_mark(grid) {
        Some(mark) if mark == player1 => Outcome::Win(Seat::One),
        Some(_) => Outcome::Win(Seat::Two),
        None if is_full(grid) => Outcome::Draw,
        None => Outcome::NoResult,
    };
    debug!(?outcome, "Evaluated grid");
    outcome
}
