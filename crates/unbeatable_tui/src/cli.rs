//! Command-line interface for unbeatable.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Unbeatable - tic-tac-toe against a computer that never loses
#[derive(Parser, Debug)]
#[command(name = "unbeatable")]
#[command(about = "Tic-tac-toe against an exhaustive minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional)
    #[arg(short, long, global = true, default_value = "unbeatable.toml")]
    pub config: PathBuf,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Start with feedback cues silenced
        #[arg(long)]
        muted: bool,

        /// Write logs here instead of the configured file
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Print the computer's move for a board
    BestMove {
        /// Nine squares in row-major order, `_` or `.` for empty (e.g. `O___X____`)
        board: String,

        /// Print the full analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Let the search play both sides from an empty board
    SelfPlay,
}
