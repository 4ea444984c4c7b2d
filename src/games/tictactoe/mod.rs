mod action;
mod contracts;
pub mod rules;
mod types;

pub use action::{Move, MoveRejection};
pub use contracts::validate;
pub use rules::evaluate;
pub use types::{Board, Cell, EMPTY_CELL, GRID_SIZE, Grid, Mark, Outcome, Player, Seat};
