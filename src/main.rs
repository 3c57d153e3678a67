//! folio - a personal portfolio page for the terminal
//!
//! # Usage
//!
//! ```bash
//! # Open the page
//! folio
//! folio --content ~/me.toml
//!
//! # CLI mode (for automation)
//! folio theme toggle
//! folio contact -n Ada -e ada@example.org -s Hi -m Hello --open
//! folio sections --json
//! ```

use std::io::{stdout, Stdout};
use std::panic;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use folio::app::{in_guarded_handler, run_effect, App, AppOptions, Completion};
use folio::cli::{Cli, Command, ExitCode, Output};
use folio::commands;
use folio::config::Config;
use folio::logging::{init_logging, LogConfig};
use folio::ui;

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<std::process::ExitCode> {
    let started = Instant::now();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        if let Err(e) = init_logging(&LogConfig::from_verbosity(cli.verbose)) {
            eprintln!("warning: {:#}", e);
        }
        return Ok(run_cli(cli, config).await.into());
    }

    // TUI mode: the terminal belongs to the page, so log to a file
    let log = LogConfig::from_verbosity(cli.verbose.max(1)).with_file(config.log_path());
    if let Err(e) = init_logging(&log) {
        eprintln!("warning: {:#}", e);
    }
    run_tui(cli, config, started).await?;
    Ok(std::process::ExitCode::SUCCESS)
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: Config) -> ExitCode {
    let output = Output::new(&cli);
    let Cli {
        command, content, ..
    } = cli;

    match command {
        Some(Command::Theme(cmd)) => {
            let location = config.storage_path();
            let store = config.preference_store();
            commands::theme_cmd(cmd, store.as_ref(), location.as_deref(), &output)
        }

        Some(Command::Contact(cmd)) => {
            let to = match &cmd.to {
                Some(to) => to.clone(),
                None => match config.portfolio(content.as_deref()) {
                    Ok(portfolio) => config.contact_address(&portfolio),
                    Err(e) => return output.error(e.to_string(), ExitCode::ContentError),
                },
            };
            commands::contact_cmd(cmd, to, &output).await
        }

        Some(Command::Sections(cmd)) => match config.portfolio(content.as_deref()) {
            Ok(portfolio) => commands::sections_cmd(cmd, &portfolio, &output),
            Err(e) => output.error(e.to_string(), ExitCode::ContentError),
        },

        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Panics inside guarded handlers or effect tasks are only logged; a panic on
/// the UI thread restores the terminal before the default hook prints it.
fn install_panic_hook() {
    let ui_thread = thread::current().id();
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if in_guarded_handler() || thread::current().id() != ui_thread {
            tracing::error!(panic = %info, "recoverable panic");
            return;
        }
        let _ = disable_raw_mode();
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            LeaveAlternateScreen,
            cursor::Show
        );
        tracing::error!(panic = %info, "fatal panic");
        default_hook(info);
    }));
}

/// Run interactive TUI
async fn run_tui(cli: Cli, config: Config, started: Instant) -> Result<()> {
    let portfolio = config.portfolio(cli.content.as_deref())?;
    let options = AppOptions {
        contact_address: config.contact_address(&portfolio),
        lazy_images: config.lazy_images(),
        started,
    };
    let mut app = App::new(portfolio, config.preference_store(), options, Instant::now());

    install_panic_hook();
    let mut terminal = init_terminal()?;
    let size = terminal.size()?;
    app.set_size(size.width, size.height);
    tracing::info!(width = size.width, height = size.height, "page opened");

    // Run the main event loop
    let result = run_event_loop(&mut terminal, &mut app).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, runs effects, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App) -> Result<()> {
    const FRAME: Duration = Duration::from_millis(16);

    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut painted = false;

    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;
        if !painted {
            app.painted(Instant::now());
            painted = true;
        }

        if event::poll(FRAME)? {
            let event = event::read()?;
            let now = Instant::now();
            app.guarded(now, |app| app.handle_event(now, event));
        }

        while let Ok(completion) = rx.try_recv() {
            let now = Instant::now();
            app.guarded(now, |app| app.complete(now, completion));
        }

        let now = Instant::now();
        app.guarded(now, |app| app.tick(now));

        for effect in app.take_effects() {
            let tx = tx.clone();
            tokio::spawn(async move {
                if let Some(completion) = run_effect(effect).await {
                    let _ = tx.send(completion);
                }
            });
        }
    }

    Ok(())
}
