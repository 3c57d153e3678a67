//! Scroll-driven effects
//!
//! Header hide/show by scroll direction, active-section highlighting and
//! smooth scrolling. Offsets are page pixels.

use std::time::{Duration, Instant};

use super::document::SectionBounds;
use super::throttle::Throttle;

/// Header hides only when scrolling down past this offset
pub const HEADER_HIDE_FLOOR: u32 = 100;
/// Distance below the top of the viewport used to pick the active section
pub const READING_LINE: u32 = 150;
/// Section highlighting runs at most once per interval
pub const HIGHLIGHT_INTERVAL: Duration = Duration::from_millis(100);
/// Duration of a smooth scroll to a section
pub const SMOOTH_SCROLL: Duration = Duration::from_millis(300);

// =============================================================================
// Header
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderVisibility {
    #[default]
    Visible,
    Hidden,
}

/// Tracks scroll direction for the header
#[derive(Debug, Clone, Default)]
pub struct HeaderTracker {
    last_offset: u32,
    visibility: HeaderVisibility,
}

impl HeaderTracker {
    pub fn on_scroll(&mut self, offset: u32) -> HeaderVisibility {
        self.visibility = if offset > self.last_offset && offset > HEADER_HIDE_FLOOR {
            HeaderVisibility::Hidden
        } else {
            HeaderVisibility::Visible
        };
        self.last_offset = offset;
        self.visibility
    }

    pub fn visibility(&self) -> HeaderVisibility {
        self.visibility
    }

    pub fn last_offset(&self) -> u32 {
        self.last_offset
    }
}

// =============================================================================
// Section highlight
// =============================================================================

/// Index of the first section (document order) whose range contains `y`
pub fn section_at(sections: &[SectionBounds], y: u32) -> Option<usize> {
    sections.iter().position(|s| s.contains(y))
}

/// Keeps exactly one nav link active
#[derive(Debug, Clone)]
pub struct SectionHighlighter {
    active: Option<usize>,
    throttle: Throttle,
}

impl Default for SectionHighlighter {
    fn default() -> Self {
        Self {
            active: None,
            throttle: Throttle::new(HIGHLIGHT_INTERVAL),
        }
    }
}

impl SectionHighlighter {
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Recompute immediately. A reading line outside every section keeps the previous link.
    pub fn update(&mut self, offset: u32, sections: &[SectionBounds]) -> bool {
        match section_at(sections, offset.saturating_add(READING_LINE)) {
            Some(index) if self.active != Some(index) => {
                self.active = Some(index);
                tracing::trace!(section = %sections[index].id, "active section");
                true
            }
            _ => false,
        }
    }

    /// Throttled scroll handler
    pub fn on_scroll(&mut self, now: Instant, offset: u32, sections: &[SectionBounds]) -> bool {
        if self.throttle.ready(now) {
            self.update(offset, sections)
        } else {
            false
        }
    }

    /// Trailing update after a burst of scroll events
    pub fn tick(&mut self, now: Instant, offset: u32, sections: &[SectionBounds]) -> bool {
        if self.throttle.trailing(now) {
            self.update(offset, sections)
        } else {
            false
        }
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }
}

// =============================================================================
// Smooth scroll
// =============================================================================

/// An in-flight scroll animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmoothScroll {
    from: u32,
    to: u32,
    started: Instant,
    duration: Duration,
}

impl SmoothScroll {
    pub fn new(from: u32, to: u32, started: Instant) -> Self {
        Self {
            from,
            to,
            started,
            duration: SMOOTH_SCROLL,
        }
    }

    pub fn target(&self) -> u32 {
        self.to
    }

    /// Position at `now` (ease-out cubic) and whether the animation finished
    pub fn position(&self, now: Instant) -> (u32, bool) {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= self.duration || self.duration.is_zero() {
            return (self.to, true);
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let eased = 1.0 - (1.0 - t).powi(3);
        let span = self.to as f64 - self.from as f64;
        let y = (self.from as f64 + span * eased).round().max(0.0) as u32;
        (y, false)
    }
}

// =============================================================================
// Scroll state
// =============================================================================

/// Last offset, header state, active section and any running animation
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    offset: u32,
    max_offset: u32,
    header: HeaderTracker,
    highlight: SectionHighlighter,
    animation: Option<SmoothScroll>,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn max_offset(&self) -> u32 {
        self.max_offset
    }

    pub fn header(&self) -> HeaderVisibility {
        self.header.visibility()
    }

    pub fn active_section(&self) -> Option<usize> {
        self.highlight.active()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Cancel a running smooth scroll where it is
    pub fn stop(&mut self) {
        self.animation = None;
    }

    /// Update the scroll limit (document or viewport changed)
    pub fn set_max_offset(&mut self, max: u32, sections: &[SectionBounds]) {
        self.max_offset = max;
        if self.offset > max {
            self.offset = max;
            self.header.on_scroll(max);
        }
        self.highlight.update(self.offset, sections);
    }

    /// Scroll event: header runs every time, highlighting is throttled
    fn scrolled(&mut self, now: Instant, offset: u32, sections: &[SectionBounds]) {
        self.offset = offset.min(self.max_offset);
        self.header.on_scroll(self.offset);
        self.highlight.on_scroll(now, self.offset, sections);
    }

    /// User scroll input by `delta` pixels; cancels smooth scrolling
    pub fn scroll_by(&mut self, now: Instant, delta: i64, sections: &[SectionBounds]) -> u32 {
        self.animation = None;
        let target = (self.offset as i64 + delta).clamp(0, self.max_offset as i64) as u32;
        self.scrolled(now, target, sections);
        self.offset
    }

    /// Jump directly to an offset
    pub fn jump_to(&mut self, now: Instant, offset: u32, sections: &[SectionBounds]) {
        self.animation = None;
        self.scrolled(now, offset, sections);
    }

    /// Start a smooth scroll to a section, leaving room for the header
    pub fn scroll_to_section(
        &mut self,
        now: Instant,
        index: usize,
        header_height: u32,
        sections: &[SectionBounds],
    ) -> bool {
        let Some(section) = sections.get(index) else {
            return false;
        };
        let target = section
            .top
            .saturating_sub(header_height)
            .min(self.max_offset);
        tracing::debug!(section = %section.id, target, "smooth scroll");
        self.animation = Some(SmoothScroll::new(self.offset, target, now));
        true
    }

    /// Advance animation and trailing highlight. Returns true if anything moved.
    pub fn tick(&mut self, now: Instant, sections: &[SectionBounds]) -> bool {
        let mut changed = false;
        if let Some(animation) = self.animation {
            let (y, done) = animation.position(now);
            if y != self.offset {
                self.scrolled(now, y, sections);
                changed = true;
            }
            if done {
                self.animation = None;
                // Make sure the destination gets highlighted
                changed |= self.highlight.update(self.offset, sections);
            }
        }
        changed |= self.highlight.tick(now, self.offset, sections);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    fn bounds(spec: &[(&str, u32, u32)]) -> Vec<SectionBounds> {
        spec.iter()
            .map(|(id, top, height)| SectionBounds {
                id: id.to_string(),
                title: id.to_string(),
                top: *top,
                height: *height,
            })
            .collect()
    }

    #[test]
    fn test_header_hides_only_scrolling_down_past_floor() {
        let mut header = HeaderTracker::default();
        assert_eq!(header.on_scroll(50), HeaderVisibility::Visible); // down, under floor
        assert_eq!(header.on_scroll(100), HeaderVisibility::Visible); // at floor
        assert_eq!(header.on_scroll(101), HeaderVisibility::Hidden);
        assert_eq!(header.on_scroll(400), HeaderVisibility::Hidden);
        assert_eq!(header.on_scroll(400), HeaderVisibility::Visible); // no movement
        assert_eq!(header.on_scroll(300), HeaderVisibility::Visible); // up
        assert_eq!(header.on_scroll(320), HeaderVisibility::Hidden);
        assert_eq!(header.last_offset(), 320);
    }

    #[test]
    fn test_header_rule_over_sequences() {
        let offsets = [0u32, 30, 90, 150, 140, 600, 20, 20, 110, 1000, 999];
        let mut header = HeaderTracker::default();
        let mut previous = 0u32;
        for offset in offsets {
            let expected = if offset > previous && offset > HEADER_HIDE_FLOOR {
                HeaderVisibility::Hidden
            } else {
                HeaderVisibility::Visible
            };
            assert_eq!(header.on_scroll(offset), expected, "offset {}", offset);
            previous = offset;
        }
    }

    #[test]
    fn test_section_at_half_open() {
        let sections = bounds(&[("a", 0, 100), ("b", 100, 100)]);
        assert_eq!(section_at(&sections, 0), Some(0));
        assert_eq!(section_at(&sections, 99), Some(0));
        assert_eq!(section_at(&sections, 100), Some(1));
        assert_eq!(section_at(&sections, 200), None);
    }

    #[test]
    fn test_section_at_first_match_wins_on_overlap() {
        let sections = bounds(&[("a", 0, 300), ("b", 100, 100)]);
        assert_eq!(section_at(&sections, 150), Some(0));
    }

    #[test]
    fn test_highlight_uses_reading_line_and_keeps_previous_in_gap() {
        let sections = bounds(&[("a", 0, 200), ("b", 300, 200)]);
        let mut highlight = SectionHighlighter::default();

        assert!(highlight.update(0, &sections)); // line at 150 -> a
        assert_eq!(highlight.active(), Some(0));
        assert!(!highlight.update(100, &sections)); // line at 250 in the gap
        assert_eq!(highlight.active(), Some(0));
        assert!(highlight.update(150, &sections)); // line at 300 -> b
        assert!(highlight.is_active(1));
        assert!(!highlight.is_active(0));
    }

    #[test]
    fn test_highlight_is_throttled_with_trailing_update() {
        let t0 = Instant::now();
        let sections = bounds(&[("a", 0, 200), ("b", 200, 200)]);
        let mut highlight = SectionHighlighter::default();

        assert!(highlight.on_scroll(t0, 0, &sections));
        assert!(!highlight.on_scroll(t0 + 10 * MS, 100, &sections));
        assert_eq!(highlight.active(), Some(0));
        assert!(highlight.tick(t0 + 110 * MS, 100, &sections));
        assert_eq!(highlight.active(), Some(1));
    }

    #[test]
    fn test_smooth_scroll_reaches_target() {
        let t0 = Instant::now();
        let anim = SmoothScroll::new(0, 600, t0);
        let (start, done) = anim.position(t0);
        assert_eq!(start, 0);
        assert!(!done);

        let (mid, done) = anim.position(t0 + 150 * MS);
        assert!(mid > 300 && mid < 600, "ease-out front-loads motion: {}", mid);
        assert!(!done);

        assert_eq!(anim.position(t0 + 300 * MS), (600, true));
    }

    #[test]
    fn test_scroll_state_clamps_and_cancels_animation() {
        let t0 = Instant::now();
        let sections = bounds(&[("a", 0, 500), ("b", 500, 500)]);
        let mut scroll = ScrollState::new();
        scroll.set_max_offset(800, &sections);

        assert_eq!(scroll.scroll_by(t0, -50, &sections), 0);
        assert_eq!(scroll.scroll_by(t0, 5000, &sections), 800);

        assert!(scroll.scroll_to_section(t0, 0, 60, &sections));
        assert!(scroll.is_animating());
        scroll.scroll_by(t0 + 10 * MS, -20, &sections);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn test_scroll_to_section_subtracts_header() {
        let t0 = Instant::now();
        let sections = bounds(&[("a", 0, 500), ("b", 500, 500)]);
        let mut scroll = ScrollState::new();
        scroll.set_max_offset(1000, &sections);

        scroll.scroll_to_section(t0, 1, 60, &sections);
        scroll.tick(t0 + 400 * MS, &sections);
        assert_eq!(scroll.offset(), 440);
        assert!(!scroll.is_animating());
        assert_eq!(scroll.active_section(), Some(1));
    }

    #[test]
    fn test_scroll_to_unknown_section() {
        let mut scroll = ScrollState::new();
        assert!(!scroll.scroll_to_section(Instant::now(), 3, 0, &[]));
    }
}
