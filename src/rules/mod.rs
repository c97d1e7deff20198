//! Terminal-state rules: win and draw detection.

mod draw;
mod win;

pub use draw::is_draw;
pub use win::{check_winner, winning_line};

/// The 8 fixed winning lines: 3 rows, 3 columns, 2 diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];
