//! Notification queue
//!
//! One toast at a time, top-right corner. A new notification replaces the
//! current one (last write wins).

use std::fmt;
use std::time::{Duration, Instant};

/// Default lifetime of a notification
pub const DEFAULT_DURATION: Duration = Duration::from_millis(5000);
/// Delay before the fade-in completes
pub const FADE_IN: Duration = Duration::from_millis(100);
/// Fade-out time before removal
pub const FADE_OUT: Duration = Duration::from_millis(300);

/// Message shown for unexpected runtime errors
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Visual phase of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    FadingIn,
    Shown,
    FadingOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub created: Instant,
    pub duration: Duration,
}

impl Notification {
    /// Phase at `now`, or `None` once fully removed
    pub fn phase(&self, now: Instant) -> Option<Phase> {
        let age = now.saturating_duration_since(self.created);
        if age < FADE_IN {
            Some(Phase::FadingIn)
        } else if age < self.duration {
            Some(Phase::Shown)
        } else if age < self.duration + FADE_OUT {
            Some(Phase::FadingOut)
        } else {
            None
        }
    }
}

/// Holds at most one current notification
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    current: Option<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any current notification with a new one
    pub fn show(
        &mut self,
        now: Instant,
        message: impl Into<String>,
        severity: Severity,
        duration: Duration,
    ) {
        let message = message.into();
        if let Some(previous) = self.current.take() {
            tracing::trace!(message = %previous.message, "notification replaced");
        }
        tracing::debug!(%severity, %message, "notification");
        self.current = Some(Notification {
            message,
            severity,
            created: now,
            duration,
        });
    }

    pub fn info(&mut self, now: Instant, message: impl Into<String>) {
        self.show(now, message, Severity::Info, DEFAULT_DURATION);
    }

    pub fn success(&mut self, now: Instant, message: impl Into<String>) {
        self.show(now, message, Severity::Success, DEFAULT_DURATION);
    }

    pub fn error(&mut self, now: Instant, message: impl Into<String>) {
        self.show(now, message, Severity::Error, DEFAULT_DURATION);
    }

    /// Drop the notification once its fade-out ends. Returns true if removed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self
            .current
            .as_ref()
            .is_some_and(|n| n.phase(now).is_none())
        {
            self.current = None;
            return true;
        }
        false
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Number of notifications on screen (0 or 1)
    pub fn visible_count(&self, now: Instant) -> usize {
        self.current
            .as_ref()
            .filter(|n| n.phase(now).is_some())
            .map_or(0, |_| 1)
    }
}
