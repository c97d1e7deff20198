//! Draw detection logic.

use super::win::check_winner;
use crate::types::Board;
use tracing::instrument;

/// Checks if the board is a draw: full with no winner.
///
/// During play the winner check strictly precedes this one, so a full
/// board holding a completed line reports a win, never a draw.
#[instrument]
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && check_winner(board).is_none()
}
