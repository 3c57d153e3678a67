//! Light and dark palettes for folio
//!
//! Color palette and style helpers for the TUI. The active palette follows
//! the page's theme attribute.

use ratatui::style::{Color, Modifier, Style};

use crate::page::theme::ThemePreference;

/// Color palette for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    /// Slightly raised background for bars and inputs
    pub surface: Color,
    pub text: Color,
    pub dim: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub border: Color,
}

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // PALETTES
    // ═══════════════════════════════════════════════════════════════════════

    pub const LIGHT: Theme = Theme {
        background: Color::Rgb(0xff, 0xff, 0xff),
        surface: Color::Rgb(0xf1, 0xf5, 0xf9),
        text: Color::Rgb(0x1e, 0x29, 0x3b),
        dim: Color::Rgb(0x64, 0x74, 0x8b),
        primary: Color::Rgb(0x03, 0x69, 0xa1),
        secondary: Color::Rgb(0x6d, 0x28, 0xd9),
        accent: Color::Rgb(0xb4, 0x53, 0x09),
        success: Color::Rgb(0x15, 0x80, 0x3d),
        error: Color::Rgb(0xb9, 0x1c, 0x1c),
        border: Color::Rgb(0x94, 0xa3, 0xb8),
    };

    pub const DARK: Theme = Theme {
        background: Color::Rgb(0x0f, 0x17, 0x2a),
        surface: Color::Rgb(0x1e, 0x29, 0x3b),
        text: Color::Rgb(0xe2, 0xe8, 0xf0),
        dim: Color::Rgb(0x94, 0xa3, 0xb8),
        primary: Color::Rgb(0x38, 0xbd, 0xf8),
        secondary: Color::Rgb(0xa7, 0x8b, 0xfa),
        accent: Color::Rgb(0xfb, 0xbf, 0x24),
        success: Color::Rgb(0x4a, 0xde, 0x80),
        error: Color::Rgb(0xf8, 0x71, 0x71),
        border: Color::Rgb(0x47, 0x55, 0x69),
    };

    pub fn for_preference(pref: ThemePreference) -> Self {
        match pref {
            ThemePreference::Light => Self::LIGHT,
            ThemePreference::Dark => Self::DARK,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// Inverted with primary color
    pub fn highlighted(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected item style
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default()
            .fg(self.success)
            .add_modifier(Modifier::BOLD)
    }

    /// Title/header style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn secondary(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn accent(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Normal/unfocused border
    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Focused border
    pub fn border_focused(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for input fields
    pub fn input(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    /// Style for input cursor
    pub fn input_cursor(&self) -> Style {
        Style::default().fg(self.background).bg(self.primary)
    }

    /// Keybinding hint style
    pub fn keybind(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Keybinding description style
    pub fn keybind_desc(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }

    /// Header bar and overlays
    pub fn surface(&self) -> Style {
        Style::default().fg(self.text).bg(self.surface)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Calculate relative luminance for a color (used in contrast ratio)
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Contrast ratio between two colors, from 1 (same) to 21 (black/white).
/// WCAG AA requires >= 4.5:1 for normal text, >= 3:1 for large text
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// Extract RGB tuple from ratatui Color (only works for Rgb variant)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(color: Color) -> (u8, u8, u8) {
        color_to_rgb(color).expect("Theme colors should all be RGB")
    }

    fn palettes() -> [(&'static str, Theme); 2] {
        [("light", Theme::LIGHT), ("dark", Theme::DARK)]
    }

    #[test]
    fn test_for_preference() {
        assert_eq!(Theme::for_preference(ThemePreference::Light), Theme::LIGHT);
        assert_eq!(Theme::for_preference(ThemePreference::Dark), Theme::DARK);
        assert_ne!(Theme::LIGHT.background, Theme::DARK.background);
    }

    #[test]
    fn test_text_contrast_against_background() {
        for (name, theme) in palettes() {
            let ratio = contrast_ratio(rgb(theme.text), rgb(theme.background));
            assert!(
                meets_wcag_aa(rgb(theme.text), rgb(theme.background)),
                "{} text should meet WCAG AA (got {:.2}:1)",
                name,
                ratio
            );
            // Inputs and the status bar sit on the surface color
            assert!(meets_wcag_aa(rgb(theme.text), rgb(theme.surface)));
        }
    }

    #[test]
    fn test_accent_colors_readable() {
        for (name, theme) in palettes() {
            let bg = rgb(theme.background);
            for (label, color) in [
                ("primary", theme.primary),
                ("secondary", theme.secondary),
                ("accent", theme.accent),
                ("success", theme.success),
                ("error", theme.error),
                ("dim", theme.dim),
            ] {
                let ratio = contrast_ratio(rgb(color), bg);
                assert!(
                    meets_wcag_aa_large(rgb(color), bg),
                    "{} {} should meet WCAG AA large (got {:.2}:1)",
                    name,
                    label,
                    ratio
                );
            }
        }
    }

    #[test]
    fn test_inverted_highlighted_contrast() {
        for (_, theme) in palettes() {
            assert!(meets_wcag_aa(rgb(theme.background), rgb(theme.primary)));
        }
    }

    #[test]
    fn test_relative_luminance_bounds() {
        assert!(relative_luminance(0, 0, 0).abs() < 0.001);
        assert!((relative_luminance(255, 255, 255) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_contrast_ratio_extremes() {
        assert!((contrast_ratio((0, 0, 0), (255, 255, 255)) - 21.0).abs() < 0.1);
        assert!((contrast_ratio((100, 100, 100), (100, 100, 100)) - 1.0).abs() < 0.001);
    }
}
