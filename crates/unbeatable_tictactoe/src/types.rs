//! Core domain types for tic-tac-toe.

use crate::error::{BoardParseError, InvalidMove, InvalidMoveKind};
use crate::rules;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Number of squares on the board.
pub const SQUARES: usize = 9;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Player O, the human. Moves first and minimizes the score.
    O,
    /// Player X, the computer. Moves second and maximizes the score.
    X,
}

impl Player {
    /// The player who opens every game.
    pub const FIRST: Player = Player::O;

    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Returns the mark drawn for this player.
    pub fn mark(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mark())
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// Result of evaluating a board.
///
/// Always recomputed from the squares, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No winner and at least one empty square.
    InProgress,
    /// Three in a row for the given player.
    Win(Player),
    /// Board full with no winner.
    Tie,
}

impl Outcome {
    /// Returns true for a win or a tie.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; SQUARES],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; SQUARES],
        }
    }

    /// Gets the square at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Checks if a square is empty. Out-of-range indices are never empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Returns all squares in row-major order.
    pub fn cells(&self) -> &[Square; SQUARES] {
        &self.squares
    }

    /// Indices of the empty squares, lowest first.
    pub fn empty_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..SQUARES).filter(|&index| self.is_empty(index))
    }

    /// Number of marks placed so far.
    pub fn move_count(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Player whose turn it is, derived from the move count.
    pub fn to_move(&self) -> Player {
        if self.move_count() % 2 == 0 {
            Player::FIRST
        } else {
            Player::FIRST.opponent()
        }
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Evaluates the board: a win takes precedence over a tie.
    pub fn outcome(&self) -> Outcome {
        rules::outcome(self)
    }

    /// Places `player`'s mark at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove`] if the index is out of range, the square is
    /// occupied, or the game is already over. The board is left untouched.
    #[instrument(level = "debug", skip(self), fields(board = %self))]
    pub fn place(&mut self, index: usize, player: Player) -> Result<(), InvalidMove> {
        match self.get(index) {
            None => return Err(InvalidMove::new(InvalidMoveKind::OutOfRange { index })),
            Some(Square::Occupied(_)) => {
                return Err(InvalidMove::new(InvalidMoveKind::Occupied { index }));
            }
            Some(Square::Empty) => {}
        }

        if self.outcome().is_terminal() {
            return Err(InvalidMove::new(InvalidMoveKind::GameOver));
        }

        self.squares[index] = Square::Occupied(player);
        Ok(())
    }

    /// Writes a square without validation. Only the search's scoped undo uses this.
    pub(crate) fn set_unchecked(&mut self, index: usize, square: Square) {
        self.squares[index] = square;
    }

    /// Formats the board as a human-readable grid, numbering empty squares 1-9.
    pub fn grid(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                match self.squares[pos] {
                    Square::Empty => result.push_str(&(pos + 1).to_string()),
                    Square::Occupied(player) => result.push(player.mark()),
                }
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

/// Compact nine-character form, `_` for empty squares (e.g. `O___X____`).
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for square in &self.squares {
            let c = match square {
                Square::Empty => '_',
                Square::Occupied(player) => player.mark(),
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Parses the compact form. `_`, `.` and `-` mean empty; marks are
/// case-insensitive. Row separators `|` and `/` are ignored.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = [Square::Empty; SQUARES];
        let mut count = 0;

        for c in s.trim().chars().filter(|c| !matches!(c, '|' | '/')) {
            let square = match c {
                '_' | '.' | '-' => Square::Empty,
                'x' | 'X' => Square::Occupied(Player::X),
                'o' | 'O' => Square::Occupied(Player::O),
                other => {
                    return Err(BoardParseError::new(format!(
                        "unexpected character '{}'",
                        other
                    )));
                }
            };
            if count == SQUARES {
                return Err(BoardParseError::new(format!(
                    "too many squares (expected {})",
                    SQUARES
                )));
            }
            squares[count] = square;
            count += 1;
        }

        if count != SQUARES {
            return Err(BoardParseError::new(format!(
                "expected {} squares, found {}",
                SQUARES, count
            )));
        }

        Ok(Self { squares })
    }
}

/// Applies a move to a copy of `board`, leaving the original untouched.
///
/// # Errors
///
/// Returns [`InvalidMove`] under the same conditions as [`Board::place`].
#[instrument(skip(board), fields(board = %board))]
pub fn apply_move(board: &Board, index: usize, player: Player) -> Result<Board, InvalidMove> {
    let mut next = board.clone();
    next.place(index, player)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.empty_indices().count(), 9);
        assert_eq!(board.move_count(), 0);
        assert_eq!(board.to_move(), Player::O);
        assert_eq!(board.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_place_sets_square() {
        let mut board = Board::new();
        board.place(4, Player::O).unwrap();
        assert_eq!(board.get(4), Some(Square::Occupied(Player::O)));
        assert_eq!(board.to_move(), Player::X);
    }

    #[test]
    fn test_place_rejects_occupied() {
        let mut board = Board::new();
        board.place(4, Player::O).unwrap();
        let err = board.place(4, Player::X).unwrap_err();
        assert_eq!(err.kind(), InvalidMoveKind::Occupied { index: 4 });
        assert_eq!(board.get(4), Some(Square::Occupied(Player::O)));
    }

    #[test]
    fn test_place_rejects_out_of_range() {
        let mut board = Board::new();
        let err = board.place(9, Player::O).unwrap_err();
        assert_eq!(err.kind(), InvalidMoveKind::OutOfRange { index: 9 });
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_place_rejects_after_win() {
        let mut board: Board = "XXX_OO___".parse().unwrap();
        let err = board.place(3, Player::O).unwrap_err();
        assert_eq!(err.kind(), InvalidMoveKind::GameOver);
    }

    #[test]
    fn test_apply_move_leaves_original() {
        let board = Board::new();
        let next = apply_move(&board, 0, Player::O).unwrap();
        assert_eq!(board, Board::new());
        assert_eq!(next.get(0), Some(Square::Occupied(Player::O)));
    }

    #[test]
    fn test_parse_and_display() {
        let board: Board = "xo_|_x_|o..".parse().unwrap();
        assert_eq!(board.to_string(), "XO__X_O__");
        assert_eq!(board.move_count(), 4);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("XO".parse::<Board>().is_err());
        assert!("XO_______X".parse::<Board>().is_err());
        assert!("XO______Z".parse::<Board>().is_err());
    }

    #[test]
    fn test_grid_numbers_empty_squares() {
        let board: Board = "O___X____".parse().unwrap();
        assert_eq!(board.grid(), "O|2|3\n-+-+-\n4|X|6\n-+-+-\n7|8|9");
    }
}
