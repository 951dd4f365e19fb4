//! Application state and key handling.

use crossterm::event::KeyCode;
use tracing::{debug, instrument};
use unbeatable_tictactoe::{Controller, Event, Position, Update};

use crate::input::move_cursor;

const PROMPT: &str = "Your move (O). Arrows + Enter or 1-9. r restart, m mute, q quit.";

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Redraw and keep going.
    Continue,
    /// Redraw and sound the terminal bell.
    Ring,
    /// Leave the application.
    Quit,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    controller: Controller,
    cursor: Position,
    status_message: String,
}

impl App {
    /// Creates a new application.
    pub fn new(muted: bool) -> Self {
        Self {
            controller: Controller::new(muted),
            cursor: Position::Center,
            status_message: PROMPT.to_string(),
        }
    }

    /// Gets the game controller.
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Gets the highlighted square.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Handles one key press.
    #[instrument(skip(self))]
    pub fn handle_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('r') => self.send(Event::RestartRequested),
            KeyCode::Char('m') => {
                let muted = self.controller.toggle_mute();
                self.status_message = if muted {
                    "Sound off.".to_string()
                } else {
                    "Sound on.".to_string()
                };
                Action::Continue
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.send(Event::CellClicked(self.cursor.to_index()))
            }
            KeyCode::Char(c) => match digit_position(c) {
                Some(pos) => {
                    self.cursor = pos;
                    self.send(Event::CellClicked(pos.to_index()))
                }
                None => Action::Continue,
            },
            other => {
                self.cursor = move_cursor(self.cursor, other);
                Action::Continue
            }
        }
    }

    fn send(&mut self, event: Event) -> Action {
        match self.controller.handle(event) {
            Ok(update) => {
                self.status_message = describe(&update);
                if update.cues().is_empty() || self.controller.muted() {
                    Action::Continue
                } else {
                    Action::Ring
                }
            }
            Err(e) => {
                debug!(error = %e, "Move rejected");
                self.status_message = format!("Invalid move: {}. Try again.", e.kind());
                Action::Continue
            }
        }
    }
}

/// Maps keys 1-9 to squares, reading the grid like a phone keypad.
fn digit_position(c: char) -> Option<Position> {
    let digit = c.to_digit(10)? as usize;
    Position::from_index(digit.checked_sub(1)?)
}

fn label(index: usize) -> &'static str {
    Position::from_index(index).map_or("?", |p| p.label())
}

fn describe(update: &Update) -> String {
    if let Some(verdict) = update.verdict() {
        return format!("{} Press 'r' to play again or 'q' to quit.", verdict);
    }
    match (update.human_move(), update.computer_move()) {
        (Some(human), Some(computer)) => format!(
            "You took {}, the AI took {}. Your move.",
            label(*human),
            label(*computer)
        ),
        _ => PROMPT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_plays_square() {
        let mut app = App::new(false);
        assert_eq!(app.handle_key(KeyCode::Char('1')), Action::Ring);
        assert_eq!(app.controller().board().to_string(), "O___X____");
        assert_eq!(app.cursor(), Position::TopLeft);
        assert_eq!(
            app.status_message(),
            "You took Top-left, the AI took Center. Your move."
        );
    }

    #[test]
    fn test_enter_plays_cursor() {
        let mut app = App::new(true);
        app.handle_key(KeyCode::Up);
        assert_eq!(app.handle_key(KeyCode::Enter), Action::Continue);
        assert_eq!(app.controller().board().move_count(), 2);
        assert!(!app.controller().board().is_empty(1));
    }

    #[test]
    fn test_occupied_square_reports_error() {
        let mut app = App::new(false);
        app.handle_key(KeyCode::Char('1'));
        assert_eq!(app.handle_key(KeyCode::Char('5')), Action::Continue);
        assert!(app.status_message().starts_with("Invalid move: square 4 is already occupied"));
    }

    #[test]
    fn test_restart_and_quit() {
        let mut app = App::new(false);
        app.handle_key(KeyCode::Char('1'));
        assert_eq!(app.handle_key(KeyCode::Char('r')), Action::Continue);
        assert_eq!(app.controller().board().move_count(), 0);
        assert_eq!(app.handle_key(KeyCode::Char('q')), Action::Quit);
    }

    #[test]
    fn test_mute_toggle_silences_cues() {
        let mut app = App::new(false);
        app.handle_key(KeyCode::Char('m'));
        assert!(app.controller().muted());
        assert_eq!(app.handle_key(KeyCode::Char('1')), Action::Continue);
    }

    #[test]
    fn test_zero_is_ignored() {
        let mut app = App::new(false);
        assert_eq!(app.handle_key(KeyCode::Char('0')), Action::Continue);
        assert_eq!(app.controller().board().move_count(), 0);
    }
}
