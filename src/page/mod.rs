//! Page behaviors
//!
//! Each component owns its own state and takes the current `Instant`
//! explicitly, so timing is driven by the caller:
//! - `theme` / `storage`: persisted light/dark preference
//! - `nav`: mobile menu open/closed, scroll lock
//! - `document` / `scroll` / `observer`: layout, header, section highlight, reveal
//! - `contact`: form validation and mailto links
//! - `notify`: single-slot toast queue
//! - `typing` / `counter` / `lazy` / `perf`: animations, deferred images, load timings

pub mod contact;
pub mod counter;
pub mod document;
pub mod lazy;
pub mod nav;
pub mod notify;
pub mod observer;
pub mod perf;
pub mod scroll;
pub mod storage;
pub mod theme;
pub mod throttle;
pub mod typing;

pub use contact::{ContactForm, ContactMessage, Field, FormError};
pub use document::{Document, ElementId, SectionBounds, Viewport, ROW_PX};
pub use nav::MobileNav;
pub use notify::{Notifier, Severity};
pub use scroll::{HeaderVisibility, ScrollState};
pub use storage::{FileStore, MemoryStore, PreferenceStore};
pub use theme::{ThemeControl, ThemePreference};
