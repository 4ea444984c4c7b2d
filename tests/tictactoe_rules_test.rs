//! Tests for the board model, move validator, and outcome evaluator.

use live_tictactoe::{
    Board, Cell, EMPTY_CELL, GameErrorKind, Grid, Mark, Move, MoveRejection, Outcome, Player, Seat,
    evaluate, validate,
};
use serde_json::json;

const E: Cell = Cell::Empty;
const X: Cell = Cell::Marked(Mark::X);
const O: Cell = Cell::Marked(Mark::O);

/// Builds a board straight from its wire form.
fn board_from(turn: u8, grid: Grid, winner: u8, draw: bool, joined: bool) -> Board {
    let p2 = if joined { json!({"type": "O", "id": 2}) } else { json!(null) };
    serde_json::from_value(json!({
        "p1": {"type": "X", "id": 1},
        "p2": p2,
        "gameStarted": joined,
        "turn": turn,
        "boardState": grid,
        "winner": winner,
        "isDraw": draw,
    }))
    .expect("valid board json")
}

fn seat1_move(x: i64, y: i64) -> Move {
    Move::new(Player::new(Mark::X, Seat::One), x, y)
}

#[test]
fn test_evaluate_empty_grid_is_no_result() {
    assert_eq!(evaluate(&[[E; 3]; 3], Mark::X), Outcome::NoResult);
}

#[test]
fn test_evaluate_player1_row_wins_seat1() {
    let grid = [[X, X, X], [O, O, E], [E, E, E]];
    assert_eq!(evaluate(&grid, Mark::X), Outcome::Win(Seat::One));
}

#[test]
fn test_evaluate_other_mark_wins_seat2() {
    let grid = [[X, X, X], [O, O, E], [E, E, E]];
    // Player 1 chose O, so the X line belongs to seat 2.
    assert_eq!(evaluate(&grid, Mark::O), Outcome::Win(Seat::Two));
}

#[test]
fn test_evaluate_column_and_diagonal() {
    let column = [[O, X, E], [O, X, E], [E, X, O]];
    assert_eq!(evaluate(&column, Mark::X), Outcome::Win(Seat::One));

    let diagonal = [[O, X, X], [E, O, X], [E, E, O]];
    assert_eq!(evaluate(&diagonal, Mark::X), Outcome::Win(Seat::Two));
}

#[test]
fn test_evaluate_full_grid_without_line_is_draw() {
    let grid = [[X, O, X], [X, O, O], [O, X, X]];
    assert_eq!(evaluate(&grid, Mark::X), Outcome::Draw);
}

#[test]
fn test_evaluate_full_grid_with_line_is_win() {
    let grid = [[X, O, O], [O, X, X], [O, X, X]];
    assert_eq!(evaluate(&grid, Mark::X), Outcome::Win(Seat::One));
}

#[test]
fn test_mark_parse() {
    assert_eq!(Mark::parse("X").unwrap(), Mark::X);
    assert_eq!(Mark::parse("o").unwrap(), Mark::O);
    assert!(Mark::parse("").is_err());
    assert_eq!(Mark::parse(" x ").unwrap(), Mark::X);
    assert!(Mark::parse("Z").is_err());
    assert!(Mark::parse("Xylophone").is_err());
    assert!(Mark::parse("o-player").is_err());
    assert!(Mark::parse("XO").is_err());
    assert_eq!(Mark::X.opponent(), Mark::O);
}

#[test]
fn test_mark_parse_error_points_at_caller() {
    let err = Mark::parse("Xylophone").unwrap_err();
    assert_eq!(err.kind(), &GameErrorKind::InvalidMark("Xylophone".to_string()));
    assert!(err.file.ends_with("tictactoe_rules_test.rs"), "recorded {}", err.file);
    assert_eq!(err.line, line!() - 3);
}

#[test]
fn test_seat_alternates() {
    assert_eq!(Seat::One.other(), Seat::Two);
    assert_eq!(Seat::Two.other(), Seat::One);
    assert_eq!(Seat::from_number(3), None);
}

#[test]
fn test_new_board_shape() {
    let board = Board::new(Player::new(Mark::X, Seat::One));
    let value = serde_json::to_value(&board).unwrap();

    assert_eq!(value["p1"], json!({"type": "X", "id": 1}));
    assert_eq!(value["p2"], json!(null));
    assert_eq!(value["gameStarted"], json!(false));
    assert_eq!(value["turn"], json!(1));
    assert_eq!(value["winner"], json!(0));
    assert_eq!(value["isDraw"], json!(false));
    assert_eq!(value["boardState"], serde_json::to_value([[EMPTY_CELL; 3]; 3]).unwrap());
}

#[test]
fn test_board_round_trips_through_wire_form() {
    let board = board_from(2, [[X, E, E], [E, O, E], [E, E, X]], 0, false, true);
    let text = serde_json::to_string(&board).unwrap();
    let back: Board = serde_json::from_str(&text).unwrap();
    assert_eq!(back, board);
    assert_eq!(back.grid()[1][1], O);
}

#[test]
fn test_validate_accepts_legal_move() {
    let board = board_from(1, [[E; 3]; 3], 0, false, true);
    assert_eq!(validate(&board, &seat1_move(1, 2)), Ok(()));
}

#[test]
fn test_validate_not_started_checked_first() {
    // Also off-grid and not seat 1's turn, but not started wins.
    let board = board_from(2, [[E; 3]; 3], 0, false, false);
    assert_eq!(validate(&board, &seat1_move(7, 7)), Err(MoveRejection::NotStarted));
}

#[test]
fn test_validate_game_over_before_turn() {
    let won = board_from(2, [[X, X, X], [O, O, E], [E, E, E]], 1, false, true);
    assert_eq!(validate(&won, &seat1_move(2, 2)), Err(MoveRejection::GameOver));

    let drawn = board_from(2, [[X, O, X], [X, O, O], [O, X, X]], 0, true, true);
    assert_eq!(validate(&drawn, &seat1_move(0, 0)), Err(MoveRejection::GameOver));
}

#[test]
fn test_validate_wrong_turn() {
    let board = board_from(2, [[X, E, E], [E; 3], [E; 3]], 0, false, true);
    assert_eq!(validate(&board, &seat1_move(1, 1)), Err(MoveRejection::NotYourTurn));
}

#[test]
fn test_validate_off_grid() {
    let board = board_from(1, [[E; 3]; 3], 0, false, true);
    assert_eq!(validate(&board, &seat1_move(3, 0)), Err(MoveRejection::OutOfBounds));
    assert_eq!(validate(&board, &seat1_move(0, -1)), Err(MoveRejection::OutOfBounds));
}

#[test]
fn test_validate_occupied_cell() {
    let board = board_from(1, [[X, O, E], [E; 3], [E; 3]], 0, false, true);
    assert_eq!(validate(&board, &seat1_move(0, 1)), Err(MoveRejection::CellOccupied));
}

#[test]
fn test_rejection_reasons() {
    assert_eq!(MoveRejection::NotStarted.to_string(), "both players must have joined");
    assert_eq!(MoveRejection::GameOver.to_string(), "the game is already over");
    assert_eq!(MoveRejection::NotYourTurn.to_string(), "it is not your move");
    assert_eq!(MoveRejection::OutOfBounds.to_string(), "invalid coordinates");
    assert_eq!(MoveRejection::CellOccupied.to_string(), "please make a legal move");
}
