//! Precondition checks for tic-tac-toe moves.
//!
//! Each check is a small named rule. [`LegalMove`] runs them in a fixed
//! order and reports the first one that fails.

use super::action::{Move, MoveRejection};
use super::{Board, Cell};
use tracing::{instrument, warn};

/// Precondition: both seats are filled.
pub struct GameStarted;

impl GameStarted {
    #[instrument(skip(board))]
    pub fn check(board: &Board) -> Result<(), MoveRejection> {
        if board.started() {
            Ok(())
        } else {
            Err(MoveRejection::NotStarted)
        }
    }
}

/// Precondition: no winner or draw has been recorded.
pub struct GameNotOver;

impl GameNotOver {
    #[instrument(skip(board))]
    pub fn check(board: &Board) -> Result<(), MoveRejection> {
        if board.is_over() {
            Err(MoveRejection::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the mover holds the seat whose turn it is.
pub struct PlayersTurn;

impl PlayersTurn {
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveRejection> {
        if mov.mover.seat() == board.turn() {
            Ok(())
        } else {
            Err(MoveRejection::NotYourTurn)
        }
    }
}

/// Precondition: the target cell is on the grid and empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveRejection> {
        let (x, y) = mov.cell().ok_or(MoveRejection::OutOfBounds)?;
        match board.cell(x, y) {
            Some(Cell::Empty) => Ok(()),
            Some(Cell::Marked(_)) => Err(MoveRejection::CellOccupied),
            None => Err(MoveRejection::OutOfBounds),
        }
    }
}

/// Composite precondition: all of the above, in order.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(board))]
    pub fn check(mov: &Move, board: &Board) -> Result<(), MoveRejection> {
        GameStarted::check(board)?;
        GameNotOver::check(board)?;
        PlayersTurn::check(mov, board)?;
        CellIsEmpty::check(mov, board)?;
        Ok(())
    }
}

/// Decides whether `mov` is legal on `board`.
///
/// Does not touch the board; the caller applies accepted moves.
#[instrument(skip(board, mov), fields(mov = %mov))]
pub fn validate(board: &Board, mov: &Move) -> Result<(), MoveRejection> {
    LegalMove::check(mov, board).inspect_err(|reason| {
        warn!(%reason, "Move rejected");
    })
}
