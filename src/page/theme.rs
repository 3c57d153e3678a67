//! Theme control
//!
//! Light/dark preference, persisted under the `theme` storage key.
//! The applied attribute and the icon glyph are kept in lockstep with the
//! stored value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::storage::PreferenceStore;

/// Storage key for the theme preference
pub const THEME_KEY: &str = "theme";

/// Theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Glyph shown on theme toggle buttons (offers the other theme)
    pub fn icon(&self) -> char {
        match self {
            ThemePreference::Light => '☾',
            ThemePreference::Dark => '☀',
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// Read the stored preference. Unset, unknown or unreadable values fall back to light.
pub fn load_preference(store: &dyn PreferenceStore) -> ThemePreference {
    match store.get(THEME_KEY) {
        Ok(Some(value)) => value.parse().unwrap_or_else(|e| {
            tracing::warn!(%e, "ignoring stored theme");
            ThemePreference::Light
        }),
        Ok(None) => ThemePreference::Light,
        Err(e) => {
            tracing::warn!(error = %e, "theme storage unreadable, using light");
            ThemePreference::Light
        }
    }
}

/// Theme state plus the visual state derived from it
pub struct ThemeControl {
    store: Box<dyn PreferenceStore>,
    preference: ThemePreference,
    /// Active palette attribute
    attribute: ThemePreference,
    /// Glyph on every theme toggle button
    icon: char,
}

impl fmt::Debug for ThemeControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeControl")
            .field("preference", &self.preference)
            .field("attribute", &self.attribute)
            .field("icon", &self.icon)
            .finish()
    }
}

impl ThemeControl {
    /// Load the stored preference and apply it
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        let preference = load_preference(store.as_ref());
        let mut control = Self {
            store,
            preference,
            attribute: preference,
            icon: preference.icon(),
        };
        control.apply(preference);
        control
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub fn attribute(&self) -> ThemePreference {
        self.attribute
    }

    pub fn icon(&self) -> char {
        self.icon
    }

    /// Set the visual attribute and update theme icons
    pub fn apply(&mut self, pref: ThemePreference) {
        self.attribute = pref;
        self.icon = pref.icon();
    }

    /// Flip, persist, re-apply
    pub fn toggle(&mut self) -> ThemePreference {
        self.set(self.preference.flipped())
    }

    /// Set an explicit preference, persist, re-apply
    pub fn set(&mut self, pref: ThemePreference) -> ThemePreference {
        self.preference = pref;
        if let Err(e) = self.store.set(THEME_KEY, pref.as_str()) {
            tracing::warn!(error = %e, "could not persist theme preference");
        }
        self.apply(pref);
        tracing::debug!(theme = %pref, "theme applied");
        pref
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::storage::{MemoryStore, StorageError};
    use std::rc::Rc;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io(std::io::Error::other("denied")))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("denied")))
        }
    }

    #[test]
    fn test_default_is_light() {
        let control = ThemeControl::new(Box::new(MemoryStore::new()));
        assert_eq!(control.preference(), ThemePreference::Light);
        assert_eq!(control.icon(), '☾');
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut control = ThemeControl::new(Box::new(MemoryStore::new()));
        let before = (control.preference(), control.attribute(), control.icon());

        assert_eq!(control.toggle(), ThemePreference::Dark);
        assert_eq!(control.attribute(), ThemePreference::Dark);
        assert_eq!(control.icon(), '☀');

        control.toggle();
        assert_eq!(
            (control.preference(), control.attribute(), control.icon()),
            before
        );
    }

    #[test]
    fn test_preference_survives_reload() {
        let store = Rc::new(MemoryStore::new());
        let mut control = ThemeControl::new(Box::new(store.clone()));
        control.toggle();
        drop(control);

        let reloaded = ThemeControl::new(Box::new(store.clone()));
        assert_eq!(reloaded.preference(), ThemePreference::Dark);
        assert_eq!(reloaded.attribute(), ThemePreference::Dark);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_storage_failure_is_not_fatal() {
        let mut control = ThemeControl::new(Box::new(BrokenStore));
        assert_eq!(control.preference(), ThemePreference::Light);
        assert_eq!(control.toggle(), ThemePreference::Dark);
        assert_eq!(control.icon(), '☀');
    }

    #[test]
    fn test_unknown_stored_value_falls_back() {
        let store = MemoryStore::new();
        store.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(load_preference(&store), ThemePreference::Light);
    }

    #[test]
    fn test_parse() {
        assert_eq!("DARK".parse::<ThemePreference>(), Ok(ThemePreference::Dark));
        assert!("blue".parse::<ThemePreference>().is_err());
    }
}
