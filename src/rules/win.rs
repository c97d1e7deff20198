//! Win detection logic.

use super::LINES;
use crate::types::{Board, Cell, Mark};
use tracing::instrument;

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if any of the 8 lines holds three equal
/// non-empty cells, `None` otherwise. Lines are scanned in fixed order
/// and the first match wins; during legal play at most one mark can
/// hold a completed line.
#[instrument]
pub fn check_winner(board: &Board) -> Option<Mark> {
    for [a, b, c] in LINES {
        let cell = board.get(a)?;
        if cell != Cell::Empty && Some(cell) == board.get(b) && Some(cell) == board.get(c) {
            return match cell {
                Cell::Occupied(mark) => Some(mark),
                Cell::Empty => None,
            };
        }
    }

    None
}

/// Returns the cell indices of the completed line, if any.
///
/// This is a pure query kept separate from [`check_winner`] so
/// presentation can highlight the line without coupling highlighting to
/// the authoritative terminal-state check.
#[instrument]
pub fn winning_line(board: &Board) -> Option<[usize; 3]> {
    for line in LINES {
        let [a, b, c] = line;
        let cell = board.get(a)?;
        if cell != Cell::Empty && Some(cell) == board.get(b) && Some(cell) == board.get(c) {
            return Some(line);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
        assert_eq!(winning_line(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new();
        for index in [0, 1, 2] {
            board.set(index, Cell::Occupied(Mark::X)).unwrap();
        }
        assert_eq!(check_winner(&board), Some(Mark::X));
        assert_eq!(winning_line(&board), Some([0, 1, 2]));
    }

    #[test]
    fn test_winner_column() {
        let mut board = Board::new();
        for index in [1, 4, 7] {
            board.set(index, Cell::Occupied(Mark::O)).unwrap();
        }
        assert_eq!(check_winner(&board), Some(Mark::O));
        assert_eq!(winning_line(&board), Some([1, 4, 7]));
    }

    #[test]
    fn test_winner_diagonal() {
        let mut board = Board::new();
        for index in [2, 4, 6] {
            board.set(index, Cell::Occupied(Mark::O)).unwrap();
        }
        assert_eq!(check_winner(&board), Some(Mark::O));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut board = Board::new();
        board.set(0, Cell::Occupied(Mark::X)).unwrap();
        board.set(1, Cell::Occupied(Mark::X)).unwrap();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winner_on_nearly_full_board() {
        // X X O / O X O / - - X: X completes the main diagonal before
        // the board fills.
        let mut board = Board::new();
        for (index, mark) in [
            (0, Mark::X),
            (1, Mark::X),
            (2, Mark::O),
            (3, Mark::O),
            (4, Mark::X),
            (5, Mark::O),
            (8, Mark::X),
        ] {
            board.set(index, Cell::Occupied(mark)).unwrap();
        }
        assert_eq!(check_winner(&board), Some(Mark::X));
        assert_eq!(winning_line(&board), Some([0, 4, 8]));
    }
}
