//! Tic-tac-toe against a computer that never loses.
//!
//! # Architecture
//!
//! - **Board model**: [`Board`], [`Square`], [`Player`] and the derived
//!   [`Outcome`]. Whose turn it is comes from the move count.
//! - **Search**: exhaustive minimax ([`best_move_for`], [`analyze`]) that
//!   places, recurses and undoes on the caller's board.
//! - **Controller**: [`Controller`] turns frontend [`Event`]s into board
//!   updates, computer replies and feedback [`Cue`]s.
//!
//! # Example
//!
//! ```
//! use unbeatable_tictactoe::{Board, Outcome, Player, apply_move, best_move_for};
//!
//! let board = apply_move(&Board::new(), 0, Player::O)?;
//! let mut scratch = board.clone();
//! assert_eq!(best_move_for(&mut scratch, Player::X), Some(4));
//! assert_eq!(scratch, board);
//! assert_eq!(board.outcome(), Outcome::InProgress);
//! # Ok::<(), unbeatable_tictactoe::InvalidMove>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod controller;
mod error;
mod position;
mod rules;
mod search;
mod types;

// Crate-level exports - Board model
pub use types::{Board, Outcome, Player, SQUARES, Square, apply_move};

// Crate-level exports - Rules
pub use rules::{LINES, check_winner, is_full};

// Crate-level exports - Positions
pub use position::Position;

// Crate-level exports - Errors
pub use error::{BoardParseError, InvalidMove, InvalidMoveKind};

// Crate-level exports - Search
pub use search::{Analysis, TIE_SCORE, WIN_SCORE, analyze, best_move_for, evaluate, leaf_score};

// Crate-level exports - Controller
pub use controller::{COMPUTER, Controller, Cue, Event, HUMAN, Update, verdict};
