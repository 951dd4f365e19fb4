//! Non-interactive subcommands.

use anyhow::{Context, Result, bail};
use tracing::{info, instrument};
use unbeatable_tictactoe::{Board, COMPUTER, Outcome, analyze, best_move_for, verdict};

/// Reports the computer's move for a text board.
///
/// Plain output is the square index (0-8); `json` prints the whole analysis.
#[instrument]
pub fn best_move(board: &str, json: bool) -> Result<String> {
    let mut board: Board = board.parse().context("Failed to parse board")?;

    if board.outcome().is_terminal() {
        bail!("Board {} is already finished ({:?})", board, board.outcome());
    }

    let Some(analysis) = analyze(&mut board, COMPUTER) else {
        bail!("Board {} has no empty square", board);
    };
    info!(index = analysis.index(), score = analysis.score(), "Move found");

    if json {
        serde_json::to_string_pretty(&analysis).context("Failed to encode analysis")
    } else {
        Ok(analysis.index().to_string())
    }
}

/// Plays both sides with the search and returns a transcript.
#[instrument]
pub fn self_play() -> Result<String> {
    let mut board = Board::new();
    let mut transcript = String::new();

    while board.outcome() == Outcome::InProgress {
        let mover = board.to_move();
        let Some(index) = best_move_for(&mut board, mover) else {
            break;
        };
        board.place(index, mover)?;
        transcript.push_str(&format!(
            "{} takes {}\n{}\n\n",
            mover,
            index + 1,
            board.grid()
        ));
    }

    let outcome = board.outcome();
    info!(?outcome, moves = board.move_count(), "Self-play finished");
    transcript.push_str(match outcome {
        Outcome::Tie => "Perfect play ends in a tie.",
        _ => verdict(outcome).unwrap_or("Game unfinished."),
    });
    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_move_plain() {
        assert_eq!(best_move("O________", false).unwrap(), "4");
        assert_eq!(best_move("XX_|OO_|___", false).unwrap(), "2");
    }

    #[test]
    fn test_best_move_json() {
        let out = best_move("XX_OO____", true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["index"], 2);
        assert_eq!(value["score"], 10);
        assert!(value["nodes"].as_u64().unwrap() > 0);
    }

    #[test]
    fn test_best_move_rejects_finished_board() {
        assert!(best_move("XOXOXOOXO", false).is_err());
        assert!(best_move("XXXOO____", false).is_err());
    }

    #[test]
    fn test_best_move_rejects_garbage() {
        assert!(best_move("hello", false).is_err());
    }

    #[test]
    fn test_self_play_ties() {
        let transcript = self_play().unwrap();
        assert!(transcript.ends_with("Perfect play ends in a tie."));
        assert_eq!(transcript.matches(" takes ").count(), 9);
    }
}
