//! Heuristic move selection.
//!
//! Priority order: complete a line for the acting mark, block the
//! opponent, take the center, take a random empty corner, then fall
//! back to a random cell. Each tier short-circuits on the first match
//! across the 8 lines in fixed order.

use super::random::random_move;
use crate::rules::LINES;
use crate::types::{Board, Cell, Mark};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::instrument;

const CENTER: usize = 4;
const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Selects a move using the tiered heuristic.
///
/// Returns `None` only when the board is full.
#[instrument(skip(rng))]
pub fn smart_move<R: Rng>(board: &Board, mark: Mark, rng: &mut R) -> Option<usize> {
    if let Some(index) = completing_cell(board, mark) {
        return Some(index);
    }

    if let Some(index) = completing_cell(board, mark.opponent()) {
        return Some(index);
    }

    if board.is_empty(CENTER) {
        return Some(CENTER);
    }

    let corners: Vec<usize> = CORNERS
        .iter()
        .copied()
        .filter(|&index| board.is_empty(index))
        .collect();
    if let Some(&corner) = corners.choose(rng) {
        return Some(corner);
    }

    random_move(board, rng)
}

/// Finds the empty cell that would complete a line for `mark`, scanning
/// the 8 lines in fixed order.
fn completing_cell(board: &Board, mark: Mark) -> Option<usize> {
    for line in LINES {
        let mut empty = None;
        let mut owned = 0;
        for index in line {
            match board.get(index) {
                Some(Cell::Occupied(m)) if m == mark => owned += 1,
                Some(Cell::Empty) => empty = Some(index),
                _ => {}
            }
        }
        if owned == 2 {
            if let Some(index) = empty {
                return Some(index);
            }
        }
    }

    None
}
