//! Live tic-tac-toe library - one shared game, HTTP moves, pushed board updates.
//!
//! # Architecture
//!
//! - **Games**: the tic-tac-toe core (board model, move validation, outcome rules)
//! - **Session**: the owned live game; one lock serializes every state change
//! - **Broadcast**: best-effort fan-out of board snapshots to connected viewers
//! - **Server**: axum routes and the `/gameboard` WebSocket
//!
//! # Example
//!
//! ```
//! use live_tictactoe::{LiveGame, Mark, Seat};
//!
//! # fn example() -> Result<(), live_tictactoe::GameError> {
//! let game = LiveGame::default();
//! let mut viewer = game.subscribe();
//!
//! game.start(Mark::X);
//! game.join()?;
//! let outcome = game.submit_move(Seat::One, 0, 0)?;
//! assert!(*outcome.accepted());
//! assert!(viewer.try_recv().is_some());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod broadcast;
mod config;
mod error;
mod games;
mod server;
mod session;

// Crate-level exports - Broadcast
pub use broadcast::{Broadcaster, DEFAULT_QUEUE_CAPACITY, Snapshot, Viewer, ViewerId};

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Errors
pub use error::{GameError, GameErrorKind};

// Crate-level exports - Server types
pub use server::{ApiError, GameServer, MakeMoveRequest, StartGameRequest, router};

// Crate-level exports - Live game
pub use session::{ACCEPTED_CODE, LiveGame, MoveOutcome, REJECTED_CODE, snapshot};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, Cell, EMPTY_CELL, GRID_SIZE, Grid, Mark, Move, MoveRejection, Outcome, Player, Seat,
    evaluate, validate,
};

/// Rule helpers for grid inspection.
pub mod rules {
    pub use crate::games::tictactoe::rules::{LINES, is_full, winning_mark};
}
