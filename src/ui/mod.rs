//! Terminal UI components
//!
//! Built with ratatui. The page scrolls under an overlaid header; the mobile
//! menu and notifications draw on top.

pub mod form;
pub mod header;
pub mod layout;
pub mod page;
pub mod theme;
pub mod toast;

pub use layout::ScreenLayout;
pub use theme::Theme;

use ratatui::{
    prelude::*,
    widgets::{Block, Clear, Paragraph},
};

use crate::app::{App, InputMode};

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let theme = Theme::for_preference(app.theme.attribute());
    let layout = app.layout();

    // Clear with background color
    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(theme.text()), area);

    page::render_page(frame, layout.content, app, &theme);
    header::render_header(frame, &layout, app, &theme);
    header::render_nav_panel(frame, &layout, app, &theme);
    toast::render_toast(frame, layout.toast, app, &theme);
    render_status_bar(frame, layout.status, app, &theme);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    if area.height == 0 {
        return;
    }

    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(theme.background).bg(theme.primary),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(theme.background).bg(theme.accent),
        ),
    };

    let section = app
        .scroll
        .active_section()
        .and_then(|i| app.document.sections.get(i))
        .map(|s| s.title.to_uppercase())
        .unwrap_or_default();

    let max = app.scroll.max_offset();
    let percent = if max == 0 {
        100
    } else {
        app.scroll.offset() as u64 * 100 / max as u64
    };

    let help = match app.input_mode {
        InputMode::Normal if app.nav.is_open() => " ↑↓:move  ↵:go  ESC:close ",
        InputMode::Normal if app.is_wide() => " q:quit  1-9:jump  t:theme  e:contact ",
        InputMode::Normal => " q:quit  m:menu  t:theme  e:contact ",
        InputMode::Editing => " TAB:next  C-s:send  ESC:done ",
    };

    let status_line = Line::from(vec![
        mode_indicator,
        Span::styled(format!(" {} ", section), theme.title()),
        Span::styled(format!("{:>3}% ", percent), theme.dimmed()),
        Span::styled(format!("{} ", app.theme.attribute()), theme.dimmed()),
        Span::raw("│"),
        Span::styled(help, theme.dimmed()),
    ]);

    frame.render_widget(Paragraph::new(status_line).style(theme.status_bar()), area);
}
