//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. The board stores squares only; every
//! verdict is recomputed from them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner};

use crate::types::{Board, Outcome};

/// Evaluates the board. A win is checked before a tie, so a full board with
/// three in a row is a win.
pub fn outcome(board: &Board) -> Outcome {
    if let Some(winner) = check_winner(board) {
        Outcome::Win(winner)
    } else if is_full(board) {
        Outcome::Tie
    } else {
        Outcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    #[test]
    fn test_outcome_in_progress() {
        let board: Board = "O___X____".parse().unwrap();
        assert_eq!(outcome(&board), Outcome::InProgress);
    }

    #[test]
    fn test_outcome_full_board_tie() {
        let board: Board = "XOXOXOOXO".parse().unwrap();
        assert_eq!(outcome(&board), Outcome::Tie);
    }

    #[test]
    fn test_outcome_win_beats_tie_on_full_board() {
        // X O X / O X O / O X X: full, X holds the main diagonal
        let board: Board = "XOXOXOOXX".parse().unwrap();
        assert_eq!(outcome(&board), Outcome::Win(Player::X));
    }

    #[test]
    fn test_outcome_is_stable_without_mutation() {
        let board: Board = "OO_XX____".parse().unwrap();
        assert_eq!(outcome(&board), outcome(&board));
    }
}
