//! Stat counters
//!
//! Counts from zero to the target once the stat first scrolls into view.

use std::time::{Duration, Instant};

/// Number of increments from zero to target
pub const STEPS: u32 = 50;
/// Time between increments
pub const STEP_INTERVAL: Duration = Duration::from_millis(30);

/// Split a stat like `"1500+"` into its target and suffix
pub fn parse_target(text: &str) -> (u64, String) {
    let text = text.trim();
    let digits: String = text
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(char::is_ascii_digit)
        .collect();
    let consumed = text
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == ','))
        .map_or(text.len(), |(i, _)| i);
    let target = digits.parse().unwrap_or(0);
    (target, text[consumed..].to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Waiting,
    Running { next: Instant },
    Done,
}

/// Animated counter for one stat
#[derive(Debug, Clone, PartialEq)]
pub struct StatCounter {
    target: u64,
    suffix: String,
    current: f64,
    increment: f64,
    state: State,
}

impl StatCounter {
    pub fn new(text: &str) -> Self {
        let (target, suffix) = parse_target(text);
        Self {
            target,
            suffix,
            current: 0.0,
            increment: target as f64 / STEPS as f64,
            state: State::Waiting,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Displayed integer value
    pub fn value(&self) -> u64 {
        (self.current.floor() as u64).min(self.target)
    }

    /// Display text: value plus the original suffix
    pub fn text(&self) -> String {
        format!("{}{}", self.value(), self.suffix)
    }

    pub fn is_started(&self) -> bool {
        self.state != State::Waiting
    }

    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Begin counting (first viewport entry). Later calls are ignored.
    pub fn start(&mut self, now: Instant) {
        if self.state == State::Waiting {
            self.state = if self.target == 0 {
                State::Done
            } else {
                State::Running {
                    next: now + STEP_INTERVAL,
                }
            };
        }
    }

    /// Apply every increment due by `now`. Returns true if the value changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let State::Running { mut next } = self.state else {
            return false;
        };
        let before = self.value();
        while now >= next {
            self.current += self.increment;
            if self.current >= self.target as f64 {
                self.current = self.target as f64;
                self.state = State::Done;
                return self.value() != before;
            }
            next += STEP_INTERVAL;
        }
        self.state = State::Running { next };
        self.value() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("150"), (150, String::new()));
        assert_eq!(parse_target("1500+"), (1500, "+".to_string()));
        assert_eq!(parse_target(" 99% "), (99, "%".to_string()));
        assert_eq!(parse_target("1,200k"), (1200, "k".to_string()));
        assert_eq!(parse_target("n/a"), (0, "n/a".to_string()));
    }

    #[test]
    fn test_waits_until_started() {
        let t0 = Instant::now();
        let mut counter = StatCounter::new("150");
        assert!(!counter.tick(t0 + 1000 * MS));
        assert_eq!(counter.value(), 0);
        assert!(!counter.is_started());
    }

    #[test]
    fn test_counts_monotonically_to_target() {
        let t0 = Instant::now();
        let mut counter = StatCounter::new("150");
        counter.start(t0);

        let mut last = 0;
        for step in 1..=60u32 {
            counter.tick(t0 + STEP_INTERVAL * step);
            let value = counter.value();
            assert!(value >= last, "went backwards at step {}", step);
            assert!(value <= 150, "overshot at step {}", step);
            last = value;
        }
        assert_eq!(counter.value(), 150);
        assert!(counter.is_done());
        assert_eq!(counter.text(), "150");
    }

    #[test]
    fn test_finishes_after_fifty_steps() {
        let t0 = Instant::now();
        let mut counter = StatCounter::new("1500+");
        counter.start(t0);
        counter.tick(t0 + STEP_INTERVAL * 49);
        assert!(!counter.is_done());
        assert!(counter.value() < 1500);
        counter.tick(t0 + STEP_INTERVAL * 50);
        assert!(counter.is_done());
        assert_eq!(counter.text(), "1500+");
    }

    #[test]
    fn test_start_is_one_shot() {
        let t0 = Instant::now();
        let mut counter = StatCounter::new("10");
        counter.start(t0);
        counter.tick(t0 + 10_000 * MS);
        assert!(counter.is_done());
        counter.start(t0 + 10_000 * MS);
        assert!(counter.is_done());
        assert_eq!(counter.value(), 10);
    }

    #[test]
    fn test_zero_target() {
        let mut counter = StatCounter::new("0");
        counter.start(Instant::now());
        assert!(counter.is_done());
        assert_eq!(counter.text(), "0");
    }
}
