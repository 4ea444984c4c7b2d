//! The live game: one owned board plus the viewers watching it.

use crate::broadcast::{Broadcaster, Snapshot, Viewer, ViewerId};
use crate::error::{GameError, GameErrorKind};
use crate::games::tictactoe::{Board, Mark, Move, MoveRejection, Player, Seat, evaluate, validate};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, instrument, warn};

/// Response code for an accepted move.
pub const ACCEPTED_CODE: u16 = 100;

/// Response code for a rejected move.
pub const REJECTED_CODE: u16 = 200;

/// Answer to a move submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MoveOutcome {
    /// Whether the move was applied.
    #[serde(rename = "moveValidity")]
    accepted: bool,
    /// [`ACCEPTED_CODE`] or [`REJECTED_CODE`].
    code: u16,
    /// Empty on success, otherwise the rejection reason.
    #[serde(rename = "message")]
    reason: String,
}

impl MoveOutcome {
    /// An accepted move.
    pub fn success() -> Self {
        Self {
            accepted: true,
            code: ACCEPTED_CODE,
            reason: String::new(),
        }
    }

    /// A rejected move.
    pub fn rejection(reason: MoveRejection) -> Self {
        Self {
            accepted: false,
            code: REJECTED_CODE,
            reason: reason.to_string(),
        }
    }
}

/// Handle to the single live game.
///
/// Clones share the same board and viewers. Every operation holds the board
/// lock from validation through broadcast, so concurrent requests are applied
/// one at a time. The viewer set has its own lock.
#[derive(Debug, Clone)]
pub struct LiveGame {
    board: Arc<Mutex<Option<Board>>>,
    viewers: Broadcaster,
}

impl LiveGame {
    /// Creates a live game with no board yet.
    #[instrument(skip(viewers))]
    pub fn new(viewers: Broadcaster) -> Self {
        info!("Creating live game");
        Self {
            board: Arc::new(Mutex::new(None)),
            viewers,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Board>> {
        self.board.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The viewer set.
    pub fn broadcaster(&self) -> &Broadcaster {
        &self.viewers
    }

    /// Registers a viewer for future snapshots.
    pub fn subscribe(&self) -> Viewer {
        self.viewers.connect()
    }

    /// Drops a viewer.
    pub fn unsubscribe(&self, id: ViewerId) {
        self.viewers.disconnect(id)
    }

    /// Copy of the current board, if a game was started.
    pub fn board(&self) -> Option<Board> {
        self.lock().clone()
    }

    /// Starts a fresh game with seat 1 holding `mark`.
    ///
    /// Any previous board is discarded. Only the caller sees the new board.
    #[instrument(skip(self))]
    pub fn start(&self, mark: Mark) -> Board {
        let board = Board::new(Player::new(mark, Seat::One));
        let replaced = self.lock().replace(board.clone()).is_some();
        info!(%mark, replaced, "Game started");
        board
    }

    /// Seats player 2 with the other mark and broadcasts the board.
    #[instrument(skip(self))]
    pub fn join(&self) -> Result<Board, GameError> {
        let mut guard = self.lock();
        let Some(board) = guard.as_mut() else {
            warn!("Join attempted with no game");
            return Err(GameError::new(GameErrorKind::NoGame));
        };

        if board.player2().is_some() {
            warn!("Join attempted on a full game");
            return Err(GameError::new(GameErrorKind::GameFull));
        }

        let mark = board.player1().mark().opponent();
        board.join(Player::new(mark, Seat::Two));
        info!(%mark, "Player 2 joined");

        self.publish(board);
        Ok(board.clone())
    }

    /// Validates and applies a move for `seat`, then broadcasts the board.
    ///
    /// The board goes out to viewers whether or not the move was accepted.
    #[instrument(skip(self))]
    pub fn submit_move(&self, seat: Seat, x: i64, y: i64) -> Result<MoveOutcome, GameError> {
        let mut guard = self.lock();
        let Some(board) = guard.as_mut() else {
            warn!("Move attempted with no game");
            return Err(GameError::new(GameErrorKind::NoGame));
        };

        let outcome = match board.player(seat).copied() {
            // Seat 2 is empty until join, which is exactly the not-started case.
            None => MoveOutcome::rejection(MoveRejection::NotStarted),
            Some(mover) => {
                let mov = Move::new(mover, x, y);
                match validate(board, &mov) {
                    Ok(()) => {
                        apply(board, &mov);
                        MoveOutcome::success()
                    }
                    Err(reason) => MoveOutcome::rejection(reason),
                }
            }
        };

        self.publish(board);
        Ok(outcome)
    }

    /// Serializes `board` and fans it out. Returns the delivery count.
    fn publish(&self, board: &Board) -> usize {
        match snapshot(board) {
            Ok(snapshot) => self.viewers.broadcast(snapshot),
            Err(e) => {
                error!(error = %e, "Failed to serialize board");
                0
            }
        }
    }
}

impl Default for LiveGame {
    fn default() -> Self {
        Self::new(Broadcaster::default())
    }
}

/// Serializes a board into a shareable snapshot.
pub fn snapshot(board: &Board) -> Result<Snapshot, serde_json::Error> {
    serde_json::to_string(board).map(Snapshot::from)
}

/// Applies a validated move: mark, pass the turn, record any outcome.
fn apply(board: &mut Board, mov: &Move) {
    let Some((x, y)) = mov.cell() else {
        return;
    };
    let seat = mov.mover.seat();
    board.place(x, y, seat);
    board.advance_turn();

    let outcome = evaluate(board.grid(), board.player1().mark());
    board.record_outcome(outcome);

    debug!(%seat, x, y, ?outcome, next = %board.turn(), "Move applied");
}
