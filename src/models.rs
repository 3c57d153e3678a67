//! Data structures for the portfolio content
//!
//! The page is driven by a TOML content file:
//! - **Profile**: owner name, contact address, typing phrases
//! - **Sections**: id (the nav hook), title, text, cards and stats
//!
//! A built-in portfolio is compiled in for when no file is given.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Content bundled with the binary
const BUILTIN_PORTFOLIO: &str = include_str!("../content/portfolio.toml");

// =============================================================================
// Errors
// =============================================================================

/// Errors from loading portfolio content
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to read content file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid content file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Content has no sections")]
    NoSections,
    #[error("Duplicate section id '{0}'")]
    DuplicateSection(String),
    #[error("Section id '{0}' must not be empty or contain whitespace")]
    InvalidSectionId(String),
}

// =============================================================================
// Profile
// =============================================================================

/// Page owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    /// Contact address used by the form when config does not override it
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    /// Phrases cycled by the typing animation
    #[serde(default)]
    pub phrases: Vec<String>,
}

// =============================================================================
// Sections
// =============================================================================

/// How a section is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Title, text, cards, stats
    #[default]
    Standard,
    /// Name banner with the typing line
    Hero,
    /// Text followed by the contact form
    Contact,
}

/// A page section, addressable from the nav by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub kind: SectionKind,
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub stats: Vec<Stat>,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.title)
    }
}

/// Skill, experience or project card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Deferred image source (ASCII art file), loaded when scrolled near
    #[serde(default)]
    pub image: Option<PathBuf>,
}

/// A numeric stat animated by a counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    /// Target text, e.g. "150" or "1500+"
    pub value: String,
}

// =============================================================================
// Portfolio
// =============================================================================

/// Whole page content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    pub sections: Vec<Section>,
}

impl Portfolio {
    /// The compiled-in portfolio
    pub fn builtin() -> Self {
        // Covered by test_builtin_portfolio_is_valid
        Self::parse(BUILTIN_PORTFOLIO).expect("built-in portfolio is valid")
    }

    /// Parse and validate content from a TOML string
    pub fn parse(s: &str) -> Result<Self, ContentError> {
        let portfolio: Portfolio = toml::from_str(s)?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    /// Load content from a file; relative image paths resolve against its directory
    pub fn load(path: &Path) -> Result<Self, ContentError> {
        let text = std::fs::read_to_string(path)?;
        let mut portfolio = Self::parse(&text)?;
        if let Some(base) = path.parent() {
            portfolio.resolve_images(base);
        }
        tracing::info!(path = %path.display(), sections = portfolio.sections.len(), "content loaded");
        Ok(portfolio)
    }

    fn validate(&self) -> Result<(), ContentError> {
        if self.sections.is_empty() {
            return Err(ContentError::NoSections);
        }
        let mut seen = HashSet::new();
        for section in &self.sections {
            if section.id.is_empty() || section.id.chars().any(char::is_whitespace) {
                return Err(ContentError::InvalidSectionId(section.id.clone()));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(ContentError::DuplicateSection(section.id.clone()));
            }
        }
        Ok(())
    }

    fn resolve_images(&mut self, base: &Path) {
        for card in self.sections.iter_mut().flat_map(|s| s.cards.iter_mut()) {
            if let Some(image) = card.image.as_mut() {
                if image.is_relative() {
                    *image = base.join(&*image);
                }
            }
        }
    }

    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }

    /// Index of the section hosting the contact form
    pub fn contact_section(&self) -> Option<usize> {
        self.sections
            .iter()
            .position(|s| s.kind == SectionKind::Contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_portfolio_is_valid() {
        let portfolio = Portfolio::parse(BUILTIN_PORTFOLIO).unwrap();
        assert!(portfolio.sections.len() >= 4);
        assert!(portfolio.contact_section().is_some());
        assert!(!portfolio.profile.phrases.is_empty());
        assert_eq!(portfolio.sections[0].kind, SectionKind::Hero);
    }

    #[test]
    fn test_parse_minimal() {
        let portfolio = Portfolio::parse(
            r#"
            [profile]
            name = "Sam"

            [[sections]]
            id = "about"
            title = "About"
            "#,
        )
        .unwrap();
        assert_eq!(portfolio.profile.name, "Sam");
        assert!(portfolio.profile.email.is_none());
        assert_eq!(portfolio.sections[0].kind, SectionKind::Standard);
        assert_eq!(portfolio.section_index("about"), Some(0));
        assert!(portfolio.contact_section().is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = Portfolio::parse(
            r#"
            [profile]
            name = "Sam"
            [[sections]]
            id = "a"
            title = "A"
            [[sections]]
            id = "a"
            title = "Again"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSection(id) if id == "a"));
    }

    #[test]
    fn test_rejects_empty_content() {
        let err = Portfolio::parse("sections = []\n[profile]\nname = \"Sam\"\n").unwrap_err();
        assert!(matches!(err, ContentError::NoSections));
    }

    #[test]
    fn test_rejects_bad_id() {
        let err = Portfolio::parse(
            "[profile]\nname = \"Sam\"\n[[sections]]\nid = \"my section\"\ntitle = \"x\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ContentError::InvalidSectionId(_)));
    }

    #[test]
    fn test_load_resolves_relative_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portfolio.toml");
        std::fs::write(
            &path,
            r#"
            [profile]
            name = "Sam"
            [[sections]]
            id = "projects"
            title = "Projects"
            [[sections.cards]]
            title = "Thing"
            image = "art/thing.txt"
            "#,
        )
        .unwrap();

        let portfolio = Portfolio::load(&path).unwrap();
        let image = portfolio.sections[0].cards[0].image.as_ref().unwrap();
        assert_eq!(image, &dir.path().join("art/thing.txt"));
    }
}
