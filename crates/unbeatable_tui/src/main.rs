//! Unbeatable - terminal tic-tac-toe against an exhaustive minimax opponent.

#![warn(missing_docs)]

mod app;
mod cli;
mod commands;
mod config;
mod input;
mod ui;

use anyhow::{Context, Result};
use app::{Action, App};
use clap::Parser;
use cli::{Cli, Command};
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    style::Print,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::path::Path;
use std::time::Duration;
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;

    match cli.command.unwrap_or(Command::Play {
        muted: false,
        log_file: None,
    }) {
        Command::Play { muted, log_file } => run_tui(config.with_overrides(muted, log_file)),
        Command::BestMove { board, json } => {
            init_stderr_tracing();
            println!("{}", commands::best_move(&board, json)?);
            Ok(())
        }
        Command::SelfPlay => {
            init_stderr_tracing();
            println!("{}", commands::self_play()?);
            Ok(())
        }
    }
}

/// Logs to stderr for the one-shot commands, quiet unless RUST_LOG says otherwise.
fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .try_init();
}

/// Logs to a file so output does not interfere with the TUI.
fn init_file_tracing(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

/// Run the TUI client
fn run_tui(config: Config) -> Result<()> {
    init_file_tracing(config.log_file())?;
    info!(?config, "Starting Unbeatable TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(*config.muted());
    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("Exiting");
    res
}

#[instrument(skip_all)]
fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.handle_key(key.code) {
            Action::Quit => {
                info!("User quit");
                return Ok(());
            }
            Action::Ring => execute!(terminal.backend_mut(), Print('\u{7}'))?,
            Action::Continue => {}
        }
    }
}
