//! Lazy image loading
//!
//! Cards with a deferred image source are loaded when they come within the
//! look-ahead margin of the viewport. Without observation support every image
//! is requested up front.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::document::{Document, ElementId, Viewport};
use super::observer::{ObserverOptions, VisibilityObserver};
use crate::models::Portfolio;

/// Pixels beyond the viewport at which loading starts
pub const LOOK_AHEAD: i32 = 50;

/// Load state of one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageState {
    /// Deferred source, not requested yet
    Deferred(PathBuf),
    /// Read in flight
    Loading(PathBuf),
    Loaded(String),
    Failed,
}

/// A load the caller must perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub element: ElementId,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct LazyImages {
    images: BTreeMap<ElementId, ImageState>,
    observer: Option<VisibilityObserver>,
}

impl LazyImages {
    /// Collect deferred images. `observe = false` falls back to eager loading.
    pub fn new(portfolio: &Portfolio, observe: bool) -> Self {
        let mut images = BTreeMap::new();
        for (section, s) in portfolio.sections.iter().enumerate() {
            for (card, c) in s.cards.iter().enumerate() {
                if let Some(path) = &c.image {
                    images.insert(
                        ElementId::Image { section, card },
                        ImageState::Deferred(path.clone()),
                    );
                }
            }
        }

        let observer = observe.then(|| {
            let mut observer = VisibilityObserver::new(ObserverOptions {
                threshold: 0.0,
                margin_top: LOOK_AHEAD,
                margin_bottom: LOOK_AHEAD,
            });
            for element in images.keys() {
                observer.observe(*element);
            }
            observer
        });

        Self { images, observer }
    }

    pub fn is_lazy(&self) -> bool {
        self.observer.is_some()
    }

    /// Images that should start loading now
    pub fn due(&mut self, viewport: Viewport, document: &Document) -> Vec<ImageRequest> {
        let elements: Vec<ElementId> = match self.observer.as_mut() {
            Some(observer) => observer.poll(viewport, document),
            None => self.images.keys().copied().collect(),
        };

        elements
            .into_iter()
            .filter_map(|element| {
                let state = self.images.get_mut(&element)?;
                let ImageState::Deferred(path) = state else {
                    return None;
                };
                let path = path.clone();
                *state = ImageState::Loading(path.clone());
                Some(ImageRequest { element, path })
            })
            .collect()
    }

    /// Record a finished load
    pub fn finish(&mut self, element: ElementId, result: Result<String, String>) {
        let Some(state) = self.images.get_mut(&element) else {
            return;
        };
        *state = match result {
            Ok(art) => ImageState::Loaded(art),
            Err(e) => {
                tracing::warn!(?element, error = %e, "image failed to load");
                ImageState::Failed
            }
        };
    }

    pub fn state(&self, element: ElementId) -> Option<&ImageState> {
        self.images.get(&element)
    }

    /// True when nothing is currently being read
    pub fn idle(&self) -> bool {
        !self
            .images
            .values()
            .any(|s| matches!(s, ImageState::Loading(_)))
    }
}
