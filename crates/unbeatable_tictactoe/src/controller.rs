//! Event-driven game controller.
//!
//! The controller owns the board and is the only thing a frontend talks to.
//! The human plays O and always moves first; after every accepted human move
//! the controller answers with the computer's move as X.

use crate::error::{InvalidMove, InvalidMoveKind};
use crate::search::best_move_for;
use crate::types::{Board, Outcome, Player};
use derive_getters::Getters;
use tracing::{debug, info, instrument, warn};

/// Side played by the person at the keyboard.
pub const HUMAN: Player = Player::O;

/// Side played by the search.
pub const COMPUTER: Player = Player::X;

/// Input from the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The human chose a square (0-8).
    CellClicked(usize),
    /// Start a fresh game.
    RestartRequested,
}

/// Feedback the frontend may sound or flash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// A mark was placed.
    Click,
    /// The human completed a line.
    HumanWins,
    /// The computer completed a line.
    ComputerWins,
    /// The board filled with no line.
    Tie,
}

/// What changed in response to one event.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Update {
    /// Square the human took, if any.
    human_move: Option<usize>,
    /// Square the computer took in reply, if any.
    computer_move: Option<usize>,
    /// Outcome after the event.
    outcome: Outcome,
    /// Feedback cues in the order they happened.
    cues: Vec<Cue>,
}

impl Update {
    /// Message to show once the game has ended.
    pub fn verdict(&self) -> Option<&'static str> {
        verdict(self.outcome)
    }
}

/// Message to show for a finished game, `None` while it is in progress.
pub fn verdict(outcome: Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::InProgress => None,
        Outcome::Win(p) if p == HUMAN => Some("You win!"),
        Outcome::Win(_) => Some("The AI wins!"),
        Outcome::Tie => Some("It's a tie!"),
    }
}

fn terminal_cue(outcome: Outcome) -> Option<Cue> {
    match outcome {
        Outcome::InProgress => None,
        Outcome::Win(p) if p == HUMAN => Some(Cue::HumanWins),
        Outcome::Win(_) => Some(Cue::ComputerWins),
        Outcome::Tie => Some(Cue::Tie),
    }
}

/// Owns the board and drives one game at a time.
#[derive(Debug, Clone, Default)]
pub struct Controller {
    board: Board,
    muted: bool,
}

impl Controller {
    /// Creates a controller with an empty board.
    #[instrument]
    pub fn new(muted: bool) -> Self {
        Self {
            board: Board::new(),
            muted,
        }
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current outcome.
    pub fn outcome(&self) -> Outcome {
        self.board.outcome()
    }

    /// Whether cues should be silenced.
    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Flips the mute flag and returns the new value.
    #[instrument(skip(self), fields(muted = self.muted))]
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        debug!(muted = self.muted, "Mute toggled");
        self.muted
    }

    /// Applies one event.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove`] when a click targets an occupied or
    /// out-of-range square, or arrives after the game ended. The board is
    /// unchanged in that case.
    #[instrument(skip(self), fields(board = %self.board))]
    pub fn handle(&mut self, event: Event) -> Result<Update, InvalidMove> {
        match event {
            Event::CellClicked(index) => self.play(index),
            Event::RestartRequested => {
                info!("Restarting game");
                self.board = Board::new();
                Ok(Update {
                    human_move: None,
                    computer_move: None,
                    outcome: Outcome::InProgress,
                    cues: Vec::new(),
                })
            }
        }
    }

    fn play(&mut self, index: usize) -> Result<Update, InvalidMove> {
        if self.board.outcome().is_terminal() {
            warn!(index, "Move arrived after the game ended");
            return Err(InvalidMove::new(InvalidMoveKind::GameOver));
        }

        self.board.place(index, HUMAN).inspect_err(|e| {
            debug!(error = %e, "Rejected human move");
        })?;
        let mut cues = vec![Cue::Click];
        let mut computer_move = None;

        if !self.board.outcome().is_terminal()
            && let Some(reply) = best_move_for(&mut self.board, COMPUTER)
        {
            self.board.place(reply, COMPUTER)?;
            cues.push(Cue::Click);
            computer_move = Some(reply);
        }

        let outcome = self.board.outcome();
        cues.extend(terminal_cue(outcome));
        info!(
            human = index,
            computer = ?computer_move,
            ?outcome,
            "Turn complete"
        );

        Ok(Update {
            human_move: Some(index),
            computer_move,
            outcome,
            cues,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_gets_reply() {
        let mut controller = Controller::new(false);
        let update = controller.handle(Event::CellClicked(0)).unwrap();
        assert_eq!(*update.human_move(), Some(0));
        assert_eq!(*update.computer_move(), Some(4));
        assert_eq!(update.cues(), &vec![Cue::Click, Cue::Click]);
        assert_eq!(controller.board().to_string(), "O___X____");
    }

    #[test]
    fn test_occupied_click_is_rejected() {
        let mut controller = Controller::new(false);
        controller.handle(Event::CellClicked(0)).unwrap();
        let err = controller.handle(Event::CellClicked(4)).unwrap_err();
        assert_eq!(err.kind(), InvalidMoveKind::Occupied { index: 4 });
        assert_eq!(controller.board().to_string(), "O___X____");
    }

    #[test]
    fn test_out_of_range_click_is_rejected() {
        let mut controller = Controller::new(false);
        let err = controller.handle(Event::CellClicked(12)).unwrap_err();
        assert_eq!(err.kind(), InvalidMoveKind::OutOfRange { index: 12 });
        assert_eq!(controller.board(), &Board::new());
    }

    #[test]
    fn test_click_after_game_over_is_rejected() {
        let mut controller = Controller::new(false);
        // O: 0, 1, 3 against X: 4, 2, 6 loses on the anti-diagonal.
        for index in [0, 1, 3] {
            controller.handle(Event::CellClicked(index)).unwrap();
        }
        assert_eq!(controller.outcome(), Outcome::Win(COMPUTER));
        let err = controller.handle(Event::CellClicked(8)).unwrap_err();
        assert_eq!(err.kind(), InvalidMoveKind::GameOver);
    }

    #[test]
    fn test_restart_clears_board() {
        let mut controller = Controller::new(false);
        controller.handle(Event::CellClicked(0)).unwrap();
        let update = controller.handle(Event::RestartRequested).unwrap();
        assert_eq!(*update.outcome(), Outcome::InProgress);
        assert!(update.cues().is_empty());
        assert_eq!(controller.board(), &Board::new());
    }

    #[test]
    fn test_toggle_mute() {
        let mut controller = Controller::new(false);
        assert!(controller.toggle_mute());
        assert!(controller.muted());
        assert!(!controller.toggle_mute());
    }

    #[test]
    fn test_verdicts() {
        assert_eq!(verdict(Outcome::Win(Player::O)), Some("You win!"));
        assert_eq!(verdict(Outcome::Win(Player::X)), Some("The AI wins!"));
        assert_eq!(verdict(Outcome::Tie), Some("It's a tie!"));
        assert_eq!(verdict(Outcome::InProgress), None);
    }
}
