//! Rate limiters for scroll and resize handlers

use std::time::{Duration, Instant};

/// Runs at most once per interval.
///
/// Calls landing inside the window are remembered so a trailing run can fire
/// once the window closes.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_run: Option<Instant>,
    pending: bool,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
            pending: false,
        }
    }

    /// Returns true if the handler should run now
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last_run {
            Some(last) if now.saturating_duration_since(last) < self.interval => {
                self.pending = true;
                false
            }
            _ => {
                self.last_run = Some(now);
                self.pending = false;
                true
            }
        }
    }

    /// Returns true once if a suppressed call is owed and the window has passed
    pub fn trailing(&mut self, now: Instant) -> bool {
        if self.pending && self.ready(now) {
            return true;
        }
        false
    }
}

/// Runs once after calls stop for `delay`
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    last_call: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_call: None,
        }
    }

    pub fn call(&mut self, now: Instant) {
        self.last_call = Some(now);
    }

    /// Returns true once when the quiet period has elapsed
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.last_call {
            Some(last) if now.saturating_duration_since(last) >= self.delay => {
                self.last_call = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.last_call.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_throttle_limits_rate() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(100 * MS);

        assert!(throttle.ready(t0));
        assert!(!throttle.ready(t0 + 10 * MS));
        assert!(!throttle.ready(t0 + 99 * MS));
        assert!(throttle.ready(t0 + 100 * MS));
    }

    #[test]
    fn test_throttle_trailing_fires_once() {
        let t0 = Instant::now();
        let mut throttle = Throttle::new(100 * MS);

        assert!(throttle.ready(t0));
        assert!(!throttle.ready(t0 + 20 * MS));
        assert!(!throttle.trailing(t0 + 50 * MS));
        assert!(throttle.trailing(t0 + 120 * MS));
        assert!(!throttle.trailing(t0 + 400 * MS));
    }

    #[test]
    fn test_debounce_waits_for_quiet() {
        let t0 = Instant::now();
        let mut debounce = Debounce::new(250 * MS);

        assert!(!debounce.fire(t0));
        debounce.call(t0);
        debounce.call(t0 + 200 * MS);
        assert!(!debounce.fire(t0 + 300 * MS));
        assert!(debounce.fire(t0 + 450 * MS));
        assert!(!debounce.fire(t0 + 900 * MS));
    }
}
