//! userdeck binary entry point.
//!
//! Parses configuration, sets up file logging, initializes the terminal in
//! raw mode, runs the TUI event loop, and restores the terminal on exit.
//!
use std::fs::OpenOptions;
use std::sync::Mutex;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use userdeck::api::HttpUserClient;
use userdeck::app::{self, AppState, Theme, keymap::Keymap};
use userdeck::config::{Cli, config_file_read_path};
use userdeck::error::{Context, Result};

/// Install a file-backed tracing subscriber; stdout belongs to the TUI.
fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_ctx(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_theme(cli: &Cli) -> Theme {
    match &cli.theme {
        Some(path) => Theme::load_or_init(&path.to_string_lossy()),
        None => config_file_read_path("theme.conf")
            .and_then(|p| Theme::from_file(&p.to_string_lossy()))
            .unwrap_or_else(Theme::mocha),
    }
}

fn load_keymap(cli: &Cli) -> Keymap {
    match &cli.keybinds {
        Some(path) => Keymap::load_or_init(&path.to_string_lossy()),
        None => config_file_read_path("keybinds.conf")
            .and_then(|p| Keymap::from_file(&p.to_string_lossy()))
            .unwrap_or_default(),
    }
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> std::io::Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    let client = HttpUserClient::new(cli.client_config()?).with_ctx(|| "build http client".to_string())?;
    let mut state = AppState::new(load_theme(&cli), load_keymap(&cli));
    tracing::info!(api = client.base_url(), "starting");

    let mut terminal = init_terminal().with_ctx(|| "init terminal".to_string())?;

    let res = app::run(&mut terminal, &mut state, &client);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err}");
    }
    Ok(())
}
