//! Core domain types for tic-tac-toe.

use crate::error::{GameError, GameErrorKind};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Mark a seat places on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Mark {
    /// Cross.
    X,
    /// Nought.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Returns the mark for a single character, ignoring case.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'X' => Some(Mark::X),
            'O' => Some(Mark::O),
            _ => None,
        }
    }

    /// Parses a mark from form input: exactly one of `X` or `O`, any case.
    ///
    /// Surrounding whitespace is ignored; anything longer is refused.
    #[track_caller]
    pub fn parse(input: &str) -> Result<Self, GameError> {
        let mut chars = input.trim().chars();
        match (chars.next().and_then(Self::from_char), chars.next()) {
            (Some(mark), None) => Ok(mark),
            _ => Err(GameError::new(GameErrorKind::InvalidMark(input.to_string()))),
        }
    }
}

/// A player's fixed position for the lifetime of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Seat {
    /// Seat 1, moves first.
    One,
    /// Seat 2.
    Two,
}

impl Seat {
    /// Returns the opposing seat.
    pub fn other(self) -> Self {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// Seat number as used on the wire (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            Seat::One => 1,
            Seat::Two => 2,
        }
    }

    /// Looks a seat up by its wire number.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Seat::One),
            2 => Some(Seat::Two),
            _ => None,
        }
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> Self {
        seat.number()
    }
}

impl TryFrom<u8> for Seat {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Seat::from_number(n).ok_or_else(|| format!("seat must be 1 or 2, got {}", n))
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A seated player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Player {
    #[serde(rename = "type")]
    mark: Mark,
    #[serde(rename = "id")]
    seat: Seat,
}

impl Player {
    /// The player's mark.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// The player's seat.
    pub fn seat(&self) -> Seat {
        self.seat
    }
}

/// Wire form of an empty cell.
pub const EMPTY_CELL: &str = "\u{0}";

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Cell {
    /// Nothing placed yet.
    Empty,
    /// Holds a mark. Never reverts to empty.
    Marked(Mark),
}

impl From<Cell> for String {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => EMPTY_CELL.to_string(),
            Cell::Marked(mark) => mark.to_string(),
        }
    }
}

impl TryFrom<String> for Cell {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s == EMPTY_CELL {
            return Ok(Cell::Empty);
        }
        let mut chars = s.chars();
        match (chars.next().and_then(Mark::from_char), chars.next()) {
            (Some(mark), None) => Ok(Cell::Marked(mark)),
            _ => Err(format!("invalid cell {:?}", s)),
        }
    }
}

/// Side length of the grid.
pub const GRID_SIZE: usize = 3;

/// Cells indexed `[row][column]`.
pub type Grid = [[Cell; GRID_SIZE]; GRID_SIZE];

/// Result of inspecting a grid after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Play continues.
    NoResult,
    /// The seat completed a line.
    Win(Seat),
    /// Grid is full without a line.
    Draw,
}

/// Shared board state for the single live game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(rename = "p1")]
    player1: Player,
    #[serde(rename = "p2")]
    player2: Option<Player>,
    #[serde(rename = "gameStarted")]
    started: bool,
    turn: Seat,
    #[serde(rename = "boardState")]
    grid: Grid,
    #[serde(with = "winner_code")]
    winner: Option<Seat>,
    #[serde(rename = "isDraw")]
    draw: bool,
}

impl Board {
    /// Creates a board waiting for a second player.
    #[instrument]
    pub fn new(player1: Player) -> Self {
        Self {
            player1,
            player2: None,
            started: false,
            turn: Seat::One,
            grid: [[Cell::Empty; GRID_SIZE]; GRID_SIZE],
            winner: None,
            draw: false,
        }
    }

    /// Player in seat 1.
    pub fn player1(&self) -> &Player {
        &self.player1
    }

    /// Player in seat 2, once joined.
    pub fn player2(&self) -> Option<&Player> {
        self.player2.as_ref()
    }

    /// Looks up the player holding `seat`.
    pub fn player(&self, seat: Seat) -> Option<&Player> {
        match seat {
            Seat::One => Some(&self.player1),
            Seat::Two => self.player2.as_ref(),
        }
    }

    /// Whether both players have joined.
    pub fn started(&self) -> bool {
        self.started
    }

    /// Seat whose move is next.
    pub fn turn(&self) -> Seat {
        self.turn
    }

    /// The grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell at `(x, y)`, or `None` outside the grid.
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.grid.get(x).and_then(|row| row.get(y)).copied()
    }

    /// Winning seat, if any.
    pub fn winner(&self) -> Option<Seat> {
        self.winner
    }

    /// Whether the game ended in a draw.
    pub fn draw(&self) -> bool {
        self.draw
    }

    /// Whether a winner or draw has been recorded.
    pub fn is_over(&self) -> bool {
        self.draw || self.winner.is_some()
    }

    /// Mark used by `seat`. Seat 2 always holds the opposite of seat 1.
    pub fn mark_of(&self, seat: Seat) -> Mark {
        match seat {
            Seat::One => self.player1.mark(),
            Seat::Two => self.player1.mark().opponent(),
        }
    }

    /// Seats the second player and starts the game.
    #[instrument(skip(self))]
    pub(crate) fn join(&mut self, player2: Player) {
        self.player2 = Some(player2);
        self.started = true;
    }

    /// Marks `(x, y)` for `seat`.
    ///
    /// Unchecked: callers validate first. Coordinates off the grid are ignored.
    #[instrument(skip(self))]
    pub(crate) fn place(&mut self, x: usize, y: usize, seat: Seat) {
        let mark = self.mark_of(seat);
        if let Some(cell) = self.grid.get_mut(x).and_then(|row| row.get_mut(y)) {
            debug_assert_eq!(*cell, Cell::Empty, "placing over an occupied cell");
            *cell = Cell::Marked(mark);
        }
    }

    /// Hands the move to the other seat.
    pub(crate) fn advance_turn(&mut self) {
        self.turn = self.turn.other();
    }

    /// Stores a terminal outcome. `NoResult` leaves the board untouched.
    pub(crate) fn record_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::NoResult => {}
            Outcome::Win(seat) => self.winner = Some(seat),
            Outcome::Draw => self.draw = true,
        }
    }
}

/// Winner travels as `0` for none, otherwise the seat number.
mod winner_code {
    use super::Seat;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(winner: &Option<Seat>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(winner.map(Seat::number).unwrap_or(0))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Seat>, D::Error> {
        match u8::deserialize(d)? {
            0 => Ok(None),
            n => Seat::from_number(n)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("winner must be 0, 1 or 2, got {}", n))),
        }
    }
}
