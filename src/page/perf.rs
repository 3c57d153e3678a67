//! Load-performance timings
//!
//! Marks are measured from process start and logged once all three are known.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct PerfTimings {
    started: Instant,
    /// Content parsed and laid out
    dom_ready: Option<Duration>,
    /// First frame drawn
    first_paint: Option<Duration>,
    /// First frame drawn and eager images settled
    load_complete: Option<Duration>,
    reported: bool,
}

impl PerfTimings {
    pub fn new(started: Instant) -> Self {
        Self {
            started,
            dom_ready: None,
            first_paint: None,
            load_complete: None,
            reported: false,
        }
    }

    fn mark(slot: &mut Option<Duration>, started: Instant, now: Instant) {
        if slot.is_none() {
            *slot = Some(now.saturating_duration_since(started));
        }
    }

    pub fn dom_ready(&mut self, now: Instant) {
        Self::mark(&mut self.dom_ready, self.started, now);
    }

    pub fn first_paint(&mut self, now: Instant) {
        Self::mark(&mut self.first_paint, self.started, now);
    }

    pub fn load_complete(&mut self, now: Instant) {
        Self::mark(&mut self.load_complete, self.started, now);
    }

    pub fn is_complete(&self) -> bool {
        self.load_complete.is_some()
    }

    pub fn get(&self) -> (Option<Duration>, Option<Duration>, Option<Duration>) {
        (self.dom_ready, self.first_paint, self.load_complete)
    }

    /// Log the metrics once every mark is in. Returns true when it logged.
    pub fn report(&mut self) -> bool {
        if self.reported {
            return false;
        }
        let (Some(dom), Some(paint), Some(load)) =
            (self.dom_ready, self.first_paint, self.load_complete)
        else {
            return false;
        };
        tracing::info!(
            dom_ready_ms = dom.as_millis() as u64,
            first_paint_ms = paint.as_millis() as u64,
            load_complete_ms = load.as_millis() as u64,
            "page load performance"
        );
        self.reported = true;
        true
    }
}
