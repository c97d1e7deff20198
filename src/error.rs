//! Error taxonomy for move application.
//!
//! Strategies signal "no move available" with `Option::None` rather
//! than an error; callers treat it as a cue to re-check the draw state.

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell index is outside 0-8.
    #[display("Cell index {} is out of bounds", _0)]
    OutOfBounds(usize),

    /// The cell at the index is already occupied.
    #[display("Cell {} is already occupied", _0)]
    Occupied(usize),

    /// The round has already ended.
    #[display("Round is already over")]
    RoundOver,
}

impl std::error::Error for MoveError {}
