//! Exhaustive minimax search for the computer's move.
//!
//! The search walks the whole remaining game tree depth-first. Each ply
//! places a mark on the caller's board, recurses, and removes the mark again
//! through [`Hypothetical`], so the board comes back unchanged on every exit
//! path. No pruning: from the empty board the tree is well under a million
//! nodes.
//!
//! Scores are from X's point of view: X (the computer) maximizes, O
//! minimizes. There is no depth discount, so a slow forced win scores the
//! same as a fast one and ties go to the lowest index.

use crate::types::{Board, Outcome, Player, SQUARES, Square};
use derive_getters::Getters;
use serde::Serialize;
use std::ops::{Deref, DerefMut};
use tracing::{debug, instrument};

/// Leaf score of a board X has won. O's wins score the negation.
pub const WIN_SCORE: i32 = 10;

/// Leaf score of a tied board.
pub const TIE_SCORE: i32 = 0;

/// Result of a top-level search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Getters)]
pub struct Analysis {
    /// Chosen square (0-8).
    index: usize,
    /// Minimax score of the chosen square, from X's point of view.
    score: i32,
    /// Positions evaluated below the root.
    nodes: u64,
}

/// A mark placed for the duration of one search branch.
///
/// Dropping the guard empties the square again.
struct Hypothetical<'a> {
    board: &'a mut Board,
    index: usize,
}

impl<'a> Hypothetical<'a> {
    fn new(board: &'a mut Board, index: usize, player: Player) -> Self {
        debug_assert!(board.is_empty(index), "hypothetical move on occupied square");
        board.set_unchecked(index, Square::Occupied(player));
        Self { board, index }
    }
}

impl Deref for Hypothetical<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for Hypothetical<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for Hypothetical<'_> {
    fn drop(&mut self) {
        self.board.set_unchecked(self.index, Square::Empty);
    }
}

/// Leaf score of a terminal outcome, `None` while the game is in progress.
pub fn leaf_score(outcome: Outcome) -> Option<i32> {
    match outcome {
        Outcome::InProgress => None,
        Outcome::Win(Player::X) => Some(WIN_SCORE),
        Outcome::Win(Player::O) => Some(-WIN_SCORE),
        Outcome::Tie => Some(TIE_SCORE),
    }
}

#[derive(Debug, Default)]
struct Searcher {
    nodes: u64,
}

impl Searcher {
    fn evaluate(&mut self, board: &mut Board, maximizing: bool) -> i32 {
        self.nodes += 1;

        if let Some(score) = leaf_score(board.outcome()) {
            return score;
        }

        let mover = if maximizing { Player::X } else { Player::O };
        let mut best: Option<i32> = None;

        for index in 0..SQUARES {
            if !board.is_empty(index) {
                continue;
            }
            let score = {
                let mut trial = Hypothetical::new(board, index, mover);
                self.evaluate(&mut trial, !maximizing)
            };
            best = Some(match best {
                None => score,
                Some(b) if maximizing => b.max(score),
                Some(b) => b.min(score),
            });
        }

        // In-progress boards always have an empty square.
        best.unwrap_or(TIE_SCORE)
    }
}

/// Scores `board` assuming both sides play perfectly from here on.
///
/// `maximizing` is true when X is to move. The board is borrowed mutably for
/// the try-and-undo recursion and is unchanged on return.
pub fn evaluate(board: &mut Board, maximizing: bool) -> i32 {
    Searcher::default().evaluate(board, maximizing)
}

/// Searches every empty square for `player` and reports the best one.
///
/// X keeps the first square with the strictly highest score, O the first
/// with the strictly lowest. Returns `None` on a full board. Calling this on
/// a board that is already won is a caller bug and asserts in debug builds.
#[instrument(skip(board), fields(board = %board))]
pub fn analyze(board: &mut Board, player: Player) -> Option<Analysis> {
    if board.is_full() {
        debug!("Board is full, no move to search");
        return None;
    }
    debug_assert!(
        !board.outcome().is_terminal(),
        "search requested on a finished game"
    );

    let maximizing = player == Player::X;
    let mut searcher = Searcher::default();
    let mut best: Option<(usize, i32)> = None;

    for index in 0..SQUARES {
        if !board.is_empty(index) {
            continue;
        }
        let score = {
            let mut trial = Hypothetical::new(board, index, player);
            searcher.evaluate(&mut trial, !maximizing)
        };
        let improves = match best {
            None => true,
            Some((_, b)) if maximizing => score > b,
            Some((_, b)) => score < b,
        };
        if improves {
            best = Some((index, score));
        }
    }

    let (index, score) = best?;
    debug!(index, score, nodes = searcher.nodes, "Search complete");
    Some(Analysis {
        index,
        score,
        nodes: searcher.nodes,
    })
}

/// Returns the optimal square for `player`, or `None` on a full board.
///
/// The board is borrowed mutably for the duration of the search and is
/// unchanged on return.
pub fn best_move_for(board: &mut Board, player: Player) -> Option<usize> {
    analyze(board, player).map(|analysis| analysis.index)
}
