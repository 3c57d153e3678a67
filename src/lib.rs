//! folio - a personal portfolio page for the terminal
//!
//! Sections, project cards, animated stats and a contact form that hands a
//! pre-filled message to the system mail client.
//!
//! # Modules
//!
//! - `models` - Portfolio content (profile, sections, cards, stats)
//! - `page` - Page behaviors: theme, nav, scroll, notifications, form, animations
//! - `app` - Application state and event routing
//! - `ui` - TUI rendering
//! - `cli` / `commands` - Scriptable subcommands
//! - `config` / `logging` / `launcher` - Ambient plumbing

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod launcher;
pub mod logging;
pub mod models;
pub mod page;
pub mod ui;

// Re-export commonly used types
pub use models::{Card, ContentError, Portfolio, Profile, Section, SectionKind, Stat};

pub use app::{App, AppOptions, Completion, Effect, InputMode};
pub use config::Config;
