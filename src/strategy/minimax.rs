//! Exhaustive minimax search with alpha-beta pruning.
//!
//! Terminal scores are depth-biased: a win for the acting mark scores
//! `10 - depth`, an opponent win `depth - 10`, a draw `0`, where depth
//! counts plies already searched from the root. Earlier wins therefore
//! score higher, steering the search toward faster forced wins and
//! slower forced losses.

use super::random::random_move;
use crate::rules::check_winner;
use crate::types::{Board, Cell, Mark};
use rand::Rng;
use tracing::{debug, instrument};

/// Selects the optimal move for the acting mark.
///
/// The search owns a scratch copy of the board and restores every cell
/// it writes on each return path; the caller's board is never mutated.
///
/// An entirely empty board short-circuits to a uniformly random cell:
/// every opening is optimal, and a fixed opening would make AI-first
/// games identical. Returns `None` only when the board is full.
#[instrument(skip(rng))]
pub fn best_move<R: Rng>(board: &Board, mark: Mark, rng: &mut R) -> Option<usize> {
    if board.cells().iter().all(|c| *c == Cell::Empty) {
        return Some(rng.gen_range(0..9));
    }

    let mut scratch = *board;
    let mut best_score = i32::MIN;
    let mut best = None;

    for index in 0..9 {
        if scratch.is_empty(index) {
            scratch.put(index, Cell::Occupied(mark));
            let score = minimax(&mut scratch, mark, 0, false, i32::MIN, i32::MAX);
            scratch.put(index, Cell::Empty);
            if score > best_score {
                best_score = score;
                best = Some(index);
            }
        }
    }

    debug!(?best, best_score, "Minimax search complete");

    // Unreachable on a non-terminal board, but mirrors the strategy
    // contract of always producing a move while empty cells remain.
    best.or_else(|| random_move(board, rng))
}

/// Recursive alpha-beta search over the scratch board.
///
/// Alternates maximizing the acting mark's score and minimizing the
/// opponent's; prunes once `beta <= alpha`.
fn minimax(
    board: &mut Board,
    mark: Mark,
    depth: i32,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if let Some(winner) = check_winner(board) {
        return if winner == mark { 10 - depth } else { depth - 10 };
    }
    if board.is_full() {
        return 0;
    }

    if maximizing {
        let mut best = i32::MIN;
        for index in 0..9 {
            if board.is_empty(index) {
                board.put(index, Cell::Occupied(mark));
                let score = minimax(board, mark, depth + 1, false, alpha, beta);
                board.put(index, Cell::Empty);
                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for index in 0..9 {
            if board.is_empty(index) {
                board.put(index, Cell::Occupied(mark.opponent()));
                let score = minimax(board, mark, depth + 1, true, alpha, beta);
                board.put(index, Cell::Empty);
                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
        }
        best
    }
}
