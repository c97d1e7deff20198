//! Round state machine: turn ownership, move application, undo, reset.

use crate::error::MoveError;
use crate::rules::check_winner;
use crate::types::{Board, Cell, Mark};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A recorded move: a mark placed at a cell index.
///
/// Immutable once recorded; the round's history is append-only during
/// play and truncated only by undo or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Cell index (0-8).
    pub index: usize,
    /// The mark placed.
    pub mark: Mark,
}

impl Move {
    /// Creates a new move.
    pub fn new(index: usize, mark: Mark) -> Self {
        Self { index, mark }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} played at position {}", self.mark, self.index + 1)
    }
}

/// Outcome of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A mark completed a line.
    Winner(Mark),
    /// Board full with no completed line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Winner(mark) => Some(*mark),
            Outcome::Draw => None,
        }
    }
}

/// Round lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    /// Accepting moves.
    Active,
    /// Terminal; only reset leaves this state.
    Ended(Outcome),
}

/// An active or finished round of tic-tac-toe.
///
/// Owns the board and move history exclusively. `Active -> Ended`
/// happens exactly once per round, on the move that completes a line or
/// fills the board; `Ended -> Active` only through [`Round::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    board: Board,
    current: Mark,
    status: RoundStatus,
    history: Vec<Move>,
}

impl Round {
    /// Creates a fresh active round with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current: Mark::X,
            status: RoundStatus::Active,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to move.
    pub fn current(&self) -> Mark {
        self.current
    }

    /// Returns the round status.
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Returns true while the round accepts moves.
    pub fn is_active(&self) -> bool {
        self.status == RoundStatus::Active
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Applies a move for the current mark at the given cell.
    ///
    /// The winner check strictly precedes the draw check: a full board
    /// holding a completed line is a win. On a win the winner stays the
    /// current mark; on a continuation the turn flips.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::RoundOver`] if the round has ended,
    /// [`MoveError::OutOfBounds`] or [`MoveError::Occupied`] for
    /// invalid cells. No state changes on error.
    #[instrument(skip(self), fields(mark = %self.current))]
    pub fn apply(&mut self, index: usize) -> Result<RoundStatus, MoveError> {
        if !self.is_active() {
            return Err(MoveError::RoundOver);
        }
        if index >= 9 {
            return Err(MoveError::OutOfBounds(index));
        }
        if !self.board.is_empty(index) {
            return Err(MoveError::Occupied(index));
        }

        let mark = self.current;
        self.board.set(index, Cell::Occupied(mark))?;
        self.history.push(Move::new(index, mark));

        if check_winner(&self.board) == Some(mark) {
            self.status = RoundStatus::Ended(Outcome::Winner(mark));
        } else if self.board.is_full() {
            self.status = RoundStatus::Ended(Outcome::Draw);
        } else {
            self.current = mark.opponent();
        }

        debug!(index, status = ?self.status, "Move applied");
        Ok(self.status)
    }

    /// Undoes the two most recent moves (an AI reply and the human move
    /// before it), returning the turn to the human mark.
    ///
    /// Returns `false` without touching state when the round has ended
    /// or fewer than two moves are recorded. Mode and in-flight-AI
    /// guards live at the session boundary.
    #[instrument(skip(self))]
    pub fn undo_pair(&mut self, human: Mark) -> bool {
        if !self.is_active() || self.history.len() < 2 {
            return false;
        }

        for _ in 0..2 {
            if let Some(m) = self.history.pop() {
                self.board.put(m.index, Cell::Empty);
            }
        }
        self.current = human;

        debug!(remaining = self.history.len(), "Undid two moves");
        true
    }

    /// Resets to a fresh active round: empty board, empty history,
    /// X to move. Idempotent.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board.clear();
        self.history.clear();
        self.current = Mark::X;
        self.status = RoundStatus::Active;
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}
