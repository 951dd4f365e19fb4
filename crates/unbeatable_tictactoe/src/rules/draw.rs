//! Draw detection logic for tic-tac-toe.

use crate::types::{Board, Square};

/// Checks if the board is full (all squares occupied).
///
/// A full board with no winner indicates a tie.
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|s| *s != Square::Empty)
}
