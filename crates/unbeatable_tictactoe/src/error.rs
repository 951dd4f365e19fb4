//! Error types for board mutation and parsing.

use derive_more::{Display, Error};
use tracing::instrument;

/// Reason a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum InvalidMoveKind {
    /// Index is not in 0..=8.
    #[display("square {index} is out of range (0-8)")]
    OutOfRange {
        /// The rejected index.
        index: usize,
    },
    /// Square already holds a mark.
    #[display("square {index} is already occupied")]
    Occupied {
        /// The rejected index.
        index: usize,
    },
    /// The board already has a winner or is tied.
    #[display("game is already over")]
    GameOver,
}

/// A move that cannot be applied to the board.
///
/// Always recoverable: the caller ignores the input and asks again.
#[derive(Debug, Clone, Display, Error)]
#[display("Invalid move: {} at {}:{}", kind, file, line)]
pub struct InvalidMove {
    /// Why the move was rejected.
    pub kind: InvalidMoveKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl InvalidMove {
    /// Creates a new invalid move error with caller location tracking.
    #[track_caller]
    #[instrument(level = "debug")]
    pub fn new(kind: InvalidMoveKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns why the move was rejected.
    pub fn kind(&self) -> InvalidMoveKind {
        self.kind
    }
}

/// Text board that could not be parsed.
#[derive(Debug, Clone, Display, Error)]
#[display("Board parse error: {} at {}:{}", message, file, line)]
pub struct BoardParseError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardParseError {
    /// Creates a new parse error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
