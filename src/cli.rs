//! CLI - Command Line Interface for folio
//!
//! Running without a subcommand opens the interactive page. Subcommands
//! expose the same behavior for scripting. All output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Theme preference
//! folio theme
//! folio theme set dark
//!
//! # Build (and optionally open) a contact mailto link
//! folio contact --name Ada --email ada@example.org --subject Hi --message Hello
//!
//! # Section bounds, or which section is highlighted at an offset
//! folio sections --json
//! folio sections --at 420
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::page::theme::ThemePreference;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments or form input
    InvalidArgs = 2,
    /// Content file missing or invalid
    ContentError = 3,
    /// Mail client could not be opened
    LaunchFailed = 4,
    /// Preference storage unreadable or unwritable
    StorageError = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// folio - a personal portfolio page for the terminal
///
/// Run without arguments to open the page.
/// Use subcommands for automation.
#[derive(Parser, Debug)]
#[command(
    name = "folio",
    version,
    about = "A personal portfolio page for the terminal",
    long_about = "Browse a portfolio in the terminal: sections, projects, stats \
                  and a contact form that opens your mail client.\n\n\
                  Run without arguments to open the page.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  folio                                Open the page\n\
                  folio --content me.toml              Open a custom portfolio\n\
                  folio theme toggle                   Flip light/dark\n\
                  folio sections --json                List section bounds"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Portfolio content file (TOML)
    #[arg(long, global = true)]
    pub content: Option<PathBuf>,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to run (omit for the interactive page)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show or change the saved theme preference
    #[command(visible_alias = "th")]
    Theme(ThemeCmd),

    /// Validate a contact message and build its mailto link
    #[command(visible_alias = "mail")]
    Contact(ContactCmd),

    /// List page sections and their bounds
    #[command(visible_alias = "ls")]
    Sections(SectionsCmd),
}

// =============================================================================
// Theme Command
// =============================================================================

/// Show or change the theme preference
#[derive(Args, Debug)]
pub struct ThemeCmd {
    /// Action (defaults to show)
    #[command(subcommand)]
    pub action: Option<ThemeAction>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    /// Print the saved preference
    Show,
    /// Flip between light and dark
    Toggle,
    /// Set an explicit preference
    Set {
        #[arg(value_enum)]
        theme: ThemeArg,
    },
}

/// Theme value on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for ThemePreference {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => ThemePreference::Light,
            ThemeArg::Dark => ThemePreference::Dark,
        }
    }
}

// =============================================================================
// Contact Command
// =============================================================================

/// Build a contact mailto link
#[derive(Args, Debug)]
pub struct ContactCmd {
    /// Sender name
    #[arg(long, short = 'n', default_value = "")]
    pub name: String,

    /// Sender email address
    #[arg(long, short = 'e', default_value = "")]
    pub email: String,

    /// Subject line
    #[arg(long, short = 's', default_value = "")]
    pub subject: String,

    /// Message body
    #[arg(long, short = 'm', default_value = "")]
    pub message: String,

    /// Recipient (overrides config and portfolio email)
    #[arg(long)]
    pub to: Option<String>,

    /// Open the link in the system mail client
    #[arg(long, short = 'o')]
    pub open: bool,
}

// =============================================================================
// Sections Command
// =============================================================================

/// List sections, or resolve the highlighted section at an offset
#[derive(Args, Debug)]
pub struct SectionsCmd {
    /// Scroll offset in page pixels (one row is 20)
    #[arg(long, short = 'a')]
    pub at: Option<u32>,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Theme preference response
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ThemeStatus {
    pub theme: String,
    /// Glyph shown on the toggle button
    pub icon: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
}

/// Contact link response
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ContactResponse {
    pub to: String,
    pub uri: String,
    pub opened: bool,
}

/// Highlighted section at an offset
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ActiveSection {
    pub offset: u32,
    /// Header visibility after scrolling straight down to `offset`
    pub header_visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print a plain line (text mode only)
    pub fn line(&self, msg: impl std::fmt::Display) {
        if !self.json {
            println!("{}", msg);
        }
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
