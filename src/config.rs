//! Configuration management for folio
//!
//! Config is stored at ~/.config/folio/config.toml. Every field is optional;
//! a missing or unreadable file yields the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{ContentError, Portfolio};
use crate::page::contact::FALLBACK_ADDRESS;
use crate::page::storage::{FileStore, MemoryStore, PreferenceStore};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Destination address for the contact form
    pub contact_email: Option<String>,
    /// Portfolio content file
    pub content: Option<PathBuf>,
    /// Load card images only when scrolled near (default true)
    pub lazy_images: Option<bool>,
    /// Log file for interactive mode
    pub log_file: Option<PathBuf>,
    /// Preference storage file (defaults to the data directory)
    pub storage_file: Option<PathBuf>,
}

impl Config {
    /// Get config file path (~/.config/folio/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("folio").join("config.toml"))
    }

    /// Load config from the default path, or return default if not found
    pub fn load() -> Self {
        Self::path().map(|p| Self::load_from(&p)).unwrap_or_default()
    }

    /// Load config from a specific file, or return default if missing/invalid
    pub fn load_from(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return Self::default(),
        };
        toml::from_str(&text).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
            Self::default()
        })
    }

    pub fn lazy_images(&self) -> bool {
        self.lazy_images.unwrap_or(true)
    }

    /// Contact address with fallback chain:
    /// 1. `contact_email` from config
    /// 2. `profile.email` from the content file
    /// 3. Built-in fallback
    pub fn contact_address(&self, portfolio: &Portfolio) -> String {
        self.contact_email
            .clone()
            .or_else(|| portfolio.profile.email.clone())
            .unwrap_or_else(|| FALLBACK_ADDRESS.to_string())
    }

    /// Portfolio from `--content`, then `content` in config, then the built-in one
    pub fn portfolio(&self, content: Option<&Path>) -> Result<Portfolio, ContentError> {
        match content.or(self.content.as_deref()) {
            Some(path) => Portfolio::load(path),
            None => Ok(Portfolio::builtin()),
        }
    }

    /// Preference storage path
    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage_file.clone().or_else(FileStore::default_path)
    }

    /// File-backed store, or an in-memory one when no data directory exists
    pub fn preference_store(&self) -> Box<dyn PreferenceStore> {
        match self.storage_path() {
            Some(path) => Box::new(FileStore::new(path)),
            None => {
                tracing::warn!("no data directory, theme preference will not persist");
                Box::new(MemoryStore::new())
            }
        }
    }

    /// Log file path for interactive mode
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::state_dir()
                .or_else(dirs::data_dir)
                .map(|p| p.join("folio").join("folio.log"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portfolio(email: Option<&str>) -> Portfolio {
        let mut p = Portfolio::builtin();
        p.profile.email = email.map(String::from);
        p
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.contact_email.is_none());
        assert!(config.content.is_none());
        assert!(config.lazy_images());
    }

    #[test]
    fn test_contact_address_fallback_chain() {
        let mut config = Config::default();
        assert_eq!(config.contact_address(&portfolio(None)), FALLBACK_ADDRESS);
        assert_eq!(
            config.contact_address(&portfolio(Some("me@site.dev"))),
            "me@site.dev"
        );
        config.contact_email = Some("override@site.dev".into());
        assert_eq!(
            config.contact_address(&portfolio(Some("me@site.dev"))),
            "override@site.dev"
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "contact_email = \"a@b.io\"\nlazy_images = false\n").unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(
            loaded,
            Config {
                contact_email: Some("a@b.io".into()),
                lazy_images: Some(false),
                ..Default::default()
            }
        );
        assert!(!loaded.lazy_images());
    }

    #[test]
    fn test_invalid_or_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load_from(&dir.path().join("missing.toml")), Config::default());

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "lazy_images = \"maybe\"").unwrap();
        assert_eq!(Config::load_from(&bad), Config::default());
    }

    #[test]
    fn test_portfolio_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("me.toml");
        std::fs::write(
            &path,
            "[profile]\nname = \"Sam\"\n\n[[sections]]\nid = \"home\"\ntitle = \"Home\"\n",
        )
        .unwrap();

        let config = Config::default();
        assert_eq!(config.portfolio(None).unwrap().profile.name, "Alex Morgan");
        assert_eq!(config.portfolio(Some(&path)).unwrap().profile.name, "Sam");

        let config = Config {
            content: Some(path.clone()),
            ..Default::default()
        };
        assert_eq!(config.portfolio(None).unwrap().profile.name, "Sam");
        assert!(config.portfolio(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_preference_store_uses_storage_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            storage_file: Some(dir.path().join("storage.toml")),
            ..Default::default()
        };
        let store = config.preference_store();
        store.set("theme", "dark").unwrap();
        assert!(dir.path().join("storage.toml").exists());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "contact_email = \"x@y.z\"\n").unwrap();
        let config = Config::load_from(&path);
        assert_eq!(config.contact_email.as_deref(), Some("x@y.z"));
        assert!(config.lazy_images.is_none());
    }
}
