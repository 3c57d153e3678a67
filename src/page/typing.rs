//! Typing animation
//!
//! Types a phrase, holds, deletes it, pauses, moves to the next phrase.
//! Runs forever.

use std::time::{Duration, Instant};

pub const START_DELAY: Duration = Duration::from_millis(2000);
pub const TYPE_STEP: Duration = Duration::from_millis(100);
pub const HOLD: Duration = Duration::from_millis(2000);
pub const DELETE_STEP: Duration = Duration::from_millis(50);
pub const PAUSE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Typing,
    Deleting,
}

/// Cyclic typing effect over a fixed phrase list
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    phrase: usize,
    chars: usize,
    step: Step,
    next: Instant,
}

impl Typewriter {
    /// Starts typing `START_DELAY` after `now`
    pub fn new(phrases: &[String], now: Instant) -> Self {
        Self {
            phrases: phrases.iter().map(|p| p.chars().collect()).collect(),
            phrase: 0,
            chars: 0,
            step: Step::Typing,
            next: now + START_DELAY,
        }
    }

    /// Currently displayed text
    pub fn text(&self) -> String {
        self.phrases
            .get(self.phrase)
            .map(|p| p[..self.chars].iter().collect())
            .unwrap_or_default()
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    /// Run every step due by `now`. Returns true if the text changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.phrases.is_empty() {
            return false;
        }
        let mut changed = false;
        while now >= self.next {
            changed |= self.step_once();
        }
        changed
    }

    fn step_once(&mut self) -> bool {
        let len = self.phrases[self.phrase].len();
        if self.step == Step::Typing {
            if self.chars < len {
                self.chars += 1;
                self.next += if self.chars == len { HOLD } else { TYPE_STEP };
                return true;
            }
            if len == 0 {
                self.advance();
                return false;
            }
            self.step = Step::Deleting;
        }

        self.chars = self.chars.saturating_sub(1);
        if self.chars == 0 {
            self.advance();
        } else {
            self.next += DELETE_STEP;
        }
        true
    }

    fn advance(&mut self) {
        self.phrase = (self.phrase + 1) % self.phrases.len();
        self.step = Step::Typing;
        self.next += PAUSE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn phrases(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_waits_for_start_delay() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new(&phrases(&["abc"]), t0);
        assert!(!tw.tick(t0 + 1999 * MS));
        assert_eq!(tw.text(), "");
        assert!(tw.tick(t0 + 2000 * MS));
        assert_eq!(tw.text(), "a");
    }

    #[test]
    fn test_types_one_char_per_100ms() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new(&phrases(&["abc"]), t0);
        tw.tick(t0 + 2000 * MS);
        tw.tick(t0 + 2100 * MS);
        assert_eq!(tw.text(), "ab");
        tw.tick(t0 + 2200 * MS);
        assert_eq!(tw.text(), "abc");
    }

    #[test]
    fn test_full_cycle_advances_and_wraps() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new(&phrases(&["ab", "xy"]), t0);

        // "ab" typed at 2000 and 2100
        tw.tick(t0 + 2100 * MS);
        assert_eq!(tw.text(), "ab");

        // Held for 2000ms, deletions at 4100 and 4150
        tw.tick(t0 + 4099 * MS);
        assert_eq!(tw.text(), "ab");
        tw.tick(t0 + 4100 * MS);
        assert_eq!(tw.text(), "a");
        tw.tick(t0 + 4150 * MS);
        assert_eq!(tw.text(), "");
        assert_eq!(tw.phrase_index(), 1);

        // 500ms pause, then next phrase starts
        tw.tick(t0 + 4649 * MS);
        assert_eq!(tw.text(), "");
        tw.tick(t0 + 4650 * MS);
        assert_eq!(tw.text(), "x");

        // Jumping far ahead wraps back around without panicking
        tw.tick(t0 + 60_000 * MS);
        assert!(tw.phrase_index() < 2);
    }

    #[test]
    fn test_empty_list_is_inert() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new(&[], t0);
        assert!(!tw.tick(t0 + 10_000 * MS));
        assert_eq!(tw.text(), "");
    }

    #[test]
    fn test_empty_phrase_does_not_stall() {
        let t0 = Instant::now();
        let mut tw = Typewriter::new(&phrases(&["", "ok"]), t0);
        tw.tick(t0 + 20_000 * MS);
        // Still cycling through phrases
        assert!(tw.phrase_index() < 2);
    }
}
