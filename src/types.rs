//! Core domain types: marks, cells, and the 3x3 board.

use crate::error::MoveError;
use serde::{Deserialize, Serialize};

/// One of the two game symbols a cell may hold.
///
/// X always moves first in a fresh round.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Mark {
    /// Mark X (goes first).
    X,
    /// Mark O (goes second).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell occupied by a mark.
    Occupied(Mark),
}

/// 3x3 tic-tac-toe board.
///
/// Cells are addressed by index 0-8 in row-major order. No richer
/// coordinate mapping is exposed; the 8 winning lines in
/// [`crate::rules`] are the only structure layered on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Sets the cell at the given index.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`] if the index is not in 0-8.
    pub fn set(&mut self, index: usize, cell: Cell) -> Result<(), MoveError> {
        if index >= 9 {
            return Err(MoveError::OutOfBounds(index));
        }
        self.cells[index] = cell;
        Ok(())
    }

    /// Writes a cell without bounds checking the index against the
    /// board API. Callers must pass an index in 0-8.
    pub(crate) fn put(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Returns true iff no empty cells remain.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| *c != Cell::Empty)
    }

    /// Resets all 9 cells to empty.
    pub fn clear(&mut self) {
        self.cells = [Cell::Empty; 9];
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Indices of all empty cells, in board order.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty cells render as their 1-based position number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                let symbol = match self.cells[index] {
                    Cell::Empty => (index + 1).to_string(),
                    Cell::Occupied(Mark::X) => "X".to_string(),
                    Cell::Occupied(Mark::O) => "O".to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
