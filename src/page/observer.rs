//! One-shot viewport visibility observer
//!
//! Elements are observed until they first intersect the (margin-adjusted)
//! viewport, reported once, then dropped.

use super::document::{Document, ElementId, Viewport};

/// Intersection options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Fraction that must be visible, `0.0..=1.0`. Elements taller than the
    /// viewport are measured against the viewport height.
    pub threshold: f32,
    /// Grows (positive) or shrinks (negative) the viewport top edge
    pub margin_top: i32,
    /// Grows (positive) or shrinks (negative) the viewport bottom edge
    pub margin_bottom: i32,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            margin_top: 0,
            margin_bottom: 0,
        }
    }
}

impl ObserverOptions {
    /// Effective `[top, bottom)` after applying margins
    fn root(&self, viewport: Viewport) -> (i64, i64) {
        let top = viewport.top as i64 - self.margin_top as i64;
        let bottom = viewport.bottom() as i64 + self.margin_bottom as i64;
        (top, bottom.max(top))
    }

    /// Whether an element at `(top, height)` counts as intersecting
    pub fn intersects(&self, viewport: Viewport, top: u32, height: u32) -> bool {
        let (root_top, root_bottom) = self.root(viewport);
        let el_top = top as i64;
        let el_bottom = el_top + height as i64;

        if height == 0 {
            return el_top >= root_top && el_top < root_bottom;
        }
        let overlap = (el_bottom.min(root_bottom) - el_top.max(root_top)).max(0);
        if overlap == 0 {
            return false;
        }
        let visible_max = (height as i64).min(root_bottom - root_top);
        overlap as f64 / visible_max as f64 >= self.threshold as f64
    }
}

/// Observer that fires once per element
#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    options: ObserverOptions,
    observed: Vec<ElementId>,
}

impl VisibilityObserver {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            observed: Vec::new(),
        }
    }

    pub fn observe(&mut self, element: ElementId) {
        if !self.observed.contains(&element) {
            self.observed.push(element);
        }
    }

    pub fn is_observing(&self, element: ElementId) -> bool {
        self.observed.contains(&element)
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Report elements entering the viewport and stop observing them
    pub fn poll(&mut self, viewport: Viewport, document: &Document) -> Vec<ElementId> {
        let options = self.options;
        let mut entered = Vec::new();
        self.observed.retain(|element| {
            let visible = document
                .bounds(*element)
                .map(|(top, height)| options.intersects(viewport, top, height))
                .unwrap_or(false);
            if visible {
                entered.push(*element);
            }
            !visible
        });
        entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Portfolio;
    use crate::page::document::ROW_PX;

    fn viewport(top: u32, height: u32) -> Viewport {
        Viewport { top, height }
    }

    #[test]
    fn test_threshold() {
        let options = ObserverOptions {
            threshold: 0.5,
            ..Default::default()
        };
        // element 100..200, viewport 0..140 -> 40% visible
        assert!(!options.intersects(viewport(0, 140), 100, 100));
        // viewport 0..150 -> 50%
        assert!(options.intersects(viewport(0, 150), 100, 100));
    }

    #[test]
    fn test_tall_element_measured_against_viewport() {
        let options = ObserverOptions {
            threshold: 0.5,
            ..Default::default()
        };
        // 5000px element, 460px viewport: 10% of the element can never fit
        assert!(options.intersects(viewport(2000, 460), 0, 5000));
        // Only the first 100px of the viewport overlaps
        assert!(!options.intersects(viewport(4900, 460), 0, 5000));
    }

    #[test]
    fn test_negative_bottom_margin_delays_entry() {
        let options = ObserverOptions {
            threshold: 0.0,
            margin_top: 0,
            margin_bottom: -50,
        };
        // element starts 20px above the viewport bottom: inside the dead zone
        assert!(!options.intersects(viewport(0, 500), 480, 100));
        assert!(options.intersects(viewport(0, 500), 440, 100));
    }

    #[test]
    fn test_positive_margin_looks_ahead() {
        let options = ObserverOptions {
            threshold: 0.0,
            margin_top: 50,
            margin_bottom: 50,
        };
        assert!(options.intersects(viewport(0, 500), 530, 100));
        assert!(!options.intersects(viewport(0, 500), 560, 100));
    }

    #[test]
    fn test_poll_is_one_shot() {
        let portfolio = Portfolio::parse(
            r#"
            [profile]
            name = "Sam"
            [[sections]]
            id = "a"
            title = "A"
            [[sections]]
            id = "b"
            title = "B"
            lines = ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]
            "#,
        )
        .unwrap();
        let document = Document::layout(&portfolio);
        let mut observer = VisibilityObserver::new(ObserverOptions::default());
        observer.observe(ElementId::Section(0));
        observer.observe(ElementId::Section(1));
        observer.observe(ElementId::Section(1));
        assert_eq!(observer.len(), 2);

        let first = observer.poll(viewport(0, 2 * ROW_PX), &document);
        assert_eq!(first, vec![ElementId::Section(0)]);
        assert!(!observer.is_observing(ElementId::Section(0)));

        // Scrolling back over section 0 reports nothing new
        let again = observer.poll(viewport(0, 2 * ROW_PX), &document);
        assert!(again.is_empty());

        let later = observer.poll(viewport(document.height - ROW_PX, ROW_PX), &document);
        assert_eq!(later, vec![ElementId::Section(1)]);
        assert!(observer.is_empty());
    }
}
