//! Screen geometry
//!
//! Computed once per frame and shared by rendering and mouse hit-testing, so
//! a click lands on exactly what was drawn.

use ratatui::layout::Rect;

/// Header bar height (rows), overlaid on the top of the page
pub const HEADER_ROWS: u16 = 3;
/// Width of the mobile nav panel
pub const NAV_PANEL_WIDTH: u16 = 24;
/// Width of a header button like `[☾]`
pub const BUTTON_WIDTH: u16 = 3;
/// Width of the notification toast
pub const TOAST_WIDTH: u16 = 46;
/// Height of the notification toast
pub const TOAST_ROWS: u16 = 3;

/// Regions of the screen for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Page viewport (everything above the status bar)
    pub content: Rect,
    pub status: Rect,
    pub header: Option<Rect>,
    /// Brand text inside the header
    pub brand: Option<Rect>,
    pub theme_button: Option<Rect>,
    /// Mobile nav toggle, narrow terminals only
    pub menu_button: Option<Rect>,
    /// Header links, wide terminals only
    pub inline_links: Vec<Rect>,
    pub nav_panel: Option<Rect>,
    pub nav_links: Vec<Rect>,
    pub toast: Rect,
}

impl ScreenLayout {
    pub fn compute(
        area: Rect,
        brand: &str,
        titles: &[&str],
        header_visible: bool,
        nav_open: bool,
        wide: bool,
    ) -> Self {
        let mut layout = Self {
            content: Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1)),
            status: Rect::new(
                area.x,
                area.y + area.height.saturating_sub(1),
                area.width,
                area.height.min(1),
            ),
            ..Default::default()
        };

        let mut below_header = area.y;

        if header_visible && layout.content.height >= HEADER_ROWS && area.width >= 12 {
            let header = Rect::new(area.x, area.y, area.width, HEADER_ROWS);
            let row = header.y + 1;
            let right = header.x + header.width - 2;

            let theme_button = Rect::new(right - BUTTON_WIDTH, row, BUTTON_WIDTH, 1);
            let mut limit = theme_button.x.saturating_sub(1);
            if !wide {
                let menu = Rect::new(theme_button.x - BUTTON_WIDTH - 1, row, BUTTON_WIDTH, 1);
                limit = menu.x.saturating_sub(1);
                layout.menu_button = Some(menu);
            }

            let brand_width = (brand.chars().count() as u16).min(limit.saturating_sub(header.x + 2));
            layout.brand = Some(Rect::new(header.x + 2, row, brand_width, 1));

            if wide {
                let mut x = header.x + 2 + brand_width + 3;
                for title in titles {
                    let width = title.chars().count() as u16 + 2;
                    if x + width > limit {
                        break;
                    }
                    layout.inline_links.push(Rect::new(x, row, width, 1));
                    x += width + 1;
                }
            }

            layout.theme_button = Some(theme_button);
            layout.header = Some(header);
            below_header = header.y + header.height;
        }

        if nav_open && !titles.is_empty() {
            let width = NAV_PANEL_WIDTH.min(area.width);
            let available = (layout.content.y + layout.content.height).saturating_sub(below_header);
            let height = (titles.len() as u16 + 2).min(available);
            if height >= 3 {
                let panel = Rect::new(area.x + area.width - width, below_header, width, height);
                for i in 0..(height - 2) {
                    layout
                        .nav_links
                        .push(Rect::new(panel.x + 1, panel.y + 1 + i, width.saturating_sub(2), 1));
                }
                layout.nav_panel = Some(panel);
            }
        }

        let toast_width = TOAST_WIDTH.min(area.width.saturating_sub(2));
        layout.toast = Rect::new(
            area.x + area.width.saturating_sub(toast_width + 1),
            below_header,
            toast_width,
            TOAST_ROWS.min(layout.content.height),
        );

        layout
    }
}
