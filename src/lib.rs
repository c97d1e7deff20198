//! Tic-tac-toe game engine with difficulty-tiered AI.
//!
//! The crate is the core behind a board-game front end: the
//! presentation layer (whatever renders cells and buttons) feeds
//! inputs into a [`Session`], drives scheduled AI moves with
//! [`Session::poll`], and renders the resulting state.
//!
//! # Architecture
//!
//! - **Board and rules**: fixed 3x3 board, line-based win/draw checks
//! - **Strategies**: random, heuristic, and minimax move selection,
//!   tiered by [`Difficulty`]
//! - **Round**: the turn/end-of-game state machine with undo
//! - **Session**: scores, ledgers, preferences, and the cancellable
//!   AI "thinking" delay
//!
//! # Example
//!
//! ```
//! use tactix::{MemoryStore, Session, Status};
//!
//! let mut session = Session::new(Box::new(MemoryStore::new()));
//! assert_eq!(session.status(), Status::YourTurn);
//!
//! // Human (X) takes the center; the AI reply is now scheduled.
//! session.select_cell(4);
//! assert!(session.is_thinking());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod history;
mod round;
mod rules;
mod session;
mod strategy;
mod types;

pub use config::{
    DIFFICULTY_KEY, GameMode, MODE_KEY, MemoryStore, PreferenceStore, Preferences, SYMBOL_KEY,
    THEME_KEY,
};
pub use error::MoveError;
pub use history::{AnnotationFeed, GameRecord};
pub use round::{Move, Outcome, Round, RoundStatus};
pub use rules::{LINES, check_winner, is_draw, winning_line};
pub use session::{Scores, Session, Status};
pub use strategy::{Difficulty, Strategy, best_move, random_move, smart_move};
pub use types::{Board, Cell, Mark};
