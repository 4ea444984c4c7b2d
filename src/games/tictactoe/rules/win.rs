//! Win detection logic for tic-tac-toe.

use super::super::{Cell, Grid, Mark};
use tracing::instrument;

/// Lines in scan order: rows, then columns, then the two diagonals.
pub const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Returns the mark filling the first complete line, if any.
#[instrument(skip(grid))]
pub fn winning_mark(grid: &Grid) -> Option<Mark> {
    LINES.iter().find_map(|[a, b, c]| {
        let first = grid[a.0][a.1];
        match first {
            Cell::Marked(mark) if first == grid[b.0][b.1] && first == grid[c.0][c.1] => Some(mark),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const E: Cell = Cell::Empty;
    const X: Cell = Cell::Marked(Mark::X);
    const O: Cell = Cell::Marked(Mark::O);

    #[test]
    fn test_no_winner_empty_grid() {
        assert_eq!(winning_mark(&[[E; 3]; 3]), None);
    }

    #[test]
    fn test_winner_top_row() {
        let grid = [[X, X, X], [O, O, E], [E, E, E]];
        assert_eq!(winning_mark(&grid), Some(Mark::X));
    }

    #[test]
    fn test_winner_middle_column() {
        let grid = [[X, O, E], [X, O, E], [E, O, X]];
        assert_eq!(winning_mark(&grid), Some(Mark::O));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let grid = [[X, E, O], [X, O, E], [O, E, X]];
        assert_eq!(winning_mark(&grid), Some(Mark::O));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let grid = [[X, X, E], [O, E, E], [E, E, O]];
        assert_eq!(winning_mark(&grid), None);
    }

    #[test]
    fn test_empty_line_is_not_a_win() {
        let grid = [[E, E, E], [X, O, X], [O, X, O]];
        assert_eq!(winning_mark(&grid), None);
    }
}
