//! Move-selection strategies and the difficulty tiers that pick them.

mod minimax;
mod random;
mod smart;

pub use minimax::best_move;
pub use random::random_move;
pub use smart::smart_move;

use crate::types::{Board, Mark};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// AI difficulty tier.
///
/// The string forms (`easy`, `medium`, `hard`) are the persisted
/// preference values.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Smart move 30% of the time, random otherwise.
    Easy,
    /// Smart move 70% of the time, random otherwise.
    Medium,
    /// Always minimax.
    Hard,
}

impl Difficulty {
    /// Rolls the strategy to use for one move at this difficulty.
    ///
    /// Easy and medium mix the smart heuristic with uniform random play
    /// at fixed probabilities; hard always searches.
    #[instrument(skip(rng))]
    pub fn roll_strategy<R: Rng>(self, rng: &mut R) -> Strategy {
        match self {
            Difficulty::Easy => {
                if rng.gen_range(0.0..1.0) < 0.3 {
                    Strategy::Smart
                } else {
                    Strategy::Random
                }
            }
            Difficulty::Medium => {
                if rng.gen_range(0.0..1.0) < 0.7 {
                    Strategy::Smart
                } else {
                    Strategy::Random
                }
            }
            Difficulty::Hard => Strategy::Minimax,
        }
    }
}

/// A move-selection strategy.
///
/// Selection is a tagged variant rather than conditionals threaded
/// through the state machine: the session resolves a [`Difficulty`] (or
/// AI-vs-AI mode) to a variant, then invokes [`Strategy::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Uniformly samples an empty cell.
    Random,
    /// Heuristic priority: win, block, center, corner, random.
    Smart,
    /// Exhaustive minimax with alpha-beta pruning.
    Minimax,
}

impl Strategy {
    /// Selects a move index for the acting mark.
    ///
    /// Returns `None` when no move is available (full board); callers
    /// treat that as a signal to re-check the draw state.
    #[instrument(skip(rng))]
    pub fn select<R: Rng>(self, board: &Board, mark: Mark, rng: &mut R) -> Option<usize> {
        match self {
            Strategy::Random => random_move(board, rng),
            Strategy::Smart => smart_move(board, mark, rng),
            Strategy::Minimax => best_move(board, mark, rng),
        }
    }
}
