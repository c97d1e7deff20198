//! Uniform random move selection.

use crate::types::Board;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::instrument;

/// Picks a uniformly random empty cell.
///
/// Returns `None` if the board is full.
#[instrument(skip(rng))]
pub fn random_move<R: Rng>(board: &Board, rng: &mut R) -> Option<usize> {
    board.empty_cells().choose(rng).copied()
}
