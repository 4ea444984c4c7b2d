//! Error types for the live game.

use derive_more::{Display, Error};

/// What went wrong with a game-level request.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameErrorKind {
    /// Join or move attempted before any game was started.
    #[display("no game has been started")]
    NoGame,
    /// A second join on a board that already has two players.
    #[display("the game already has two players")]
    GameFull,
    /// Start requested with something other than X or O.
    #[display("invalid mark {:?}: expected X or O", _0)]
    InvalidMark(String),
}

/// Game error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct GameError {
    /// Error kind.
    pub kind: GameErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new game error with caller location tracking.
    #[track_caller]
    pub fn new(kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// The error kind.
    pub fn kind(&self) -> &GameErrorKind {
        &self.kind
    }
}
