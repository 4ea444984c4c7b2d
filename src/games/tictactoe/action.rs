//! First-class move and rejection types for tic-tac-toe.
//!
//! A move is the mover's intent. It is validated independently of
//! execution and discarded once the request is answered.

use super::{GRID_SIZE, Player};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A move: a player placing their mark at `(x, y)`.
///
/// Coordinates are taken as received, so off-grid values can be
/// represented and rejected instead of faulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Move {
    /// The player making the move.
    pub mover: Player,
    /// Row index.
    pub x: i64,
    /// Column index.
    pub y: i64,
}

impl Move {
    /// Grid indices, or `None` if either coordinate is off the grid.
    pub fn cell(&self) -> Option<(usize, usize)> {
        let on_grid = |v: i64| usize::try_from(v).ok().filter(|v| *v < GRID_SIZE);
        Some((on_grid(self.x)?, on_grid(self.y)?))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "seat {} ({}) -> ({}, {})", self.mover.seat(), self.mover.mark(), self.x, self.y)
    }
}

/// Why a move was refused. The display text is what the mover sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveRejection {
    /// Seat 2 is still empty.
    #[display("both players must have joined")]
    NotStarted,

    /// A winner or draw is already recorded.
    #[display("the game is already over")]
    GameOver,

    /// The other seat is due to move.
    #[display("it is not your move")]
    NotYourTurn,

    /// A coordinate lies outside `0..=2`.
    #[display("invalid coordinates")]
    OutOfBounds,

    /// The target cell already holds a mark.
    #[display("please make a legal move")]
    CellOccupied,
}

impl std::error::Error for MoveRejection {}
