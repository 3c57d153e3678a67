//! Header bar and mobile nav panel

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::App;
use crate::ui::layout::ScreenLayout;
use crate::ui::Theme;

/// Header with brand, inline links (wide) or menu toggle (narrow), theme button
pub fn render_header(frame: &mut Frame, layout: &ScreenLayout, app: &App, theme: &Theme) {
    let Some(area) = layout.header else {
        return;
    };

    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border())
            .style(theme.surface()),
        area,
    );

    if let Some(brand) = layout.brand {
        frame.render_widget(
            Paragraph::new(Span::styled(app.portfolio.profile.name.clone(), theme.title())),
            brand,
        );
    }

    for (index, rect) in layout.inline_links.iter().enumerate() {
        let Some(section) = app.portfolio.sections.get(index) else {
            continue;
        };
        let style = if app.scroll.active_section() == Some(index) {
            theme.highlighted()
        } else {
            theme.surface()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {} ", section.title), style)),
            *rect,
        );
    }

    if let Some(rect) = layout.menu_button {
        let style = if app.nav.is_active() {
            theme.highlighted()
        } else {
            theme.accent()
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format!("[{}]", app.nav.icon()), style)),
            rect,
        );
    }

    if let Some(rect) = layout.theme_button {
        frame.render_widget(
            Paragraph::new(Span::styled(format!("[{}]", app.theme.icon()), theme.accent())),
            rect,
        );
    }
}

/// Mobile nav overlay with the link cursor and active section
pub fn render_nav_panel(frame: &mut Frame, layout: &ScreenLayout, app: &App, theme: &Theme) {
    let Some(panel) = layout.nav_panel else {
        return;
    };

    frame.render_widget(Clear, panel);
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_focused())
            .title(Span::styled(" MENU ", theme.title()))
            .style(theme.surface()),
        panel,
    );

    for (index, rect) in layout.nav_links.iter().enumerate() {
        let Some(section) = app.portfolio.sections.get(index) else {
            continue;
        };
        let is_cursor = app.nav.cursor() == index;
        let is_active = app.scroll.active_section() == Some(index);

        let marker = if is_cursor { "▸ " } else { "  " };
        let line = Line::from(vec![
            Span::styled(marker, theme.accent()),
            Span::styled(format!("{} ", index + 1), theme.dimmed()),
            Span::styled(
                section.title.clone(),
                if is_cursor {
                    theme.highlighted()
                } else if is_active {
                    theme.selected()
                } else {
                    theme.surface()
                },
            ),
        ]);
        frame.render_widget(Paragraph::new(line), *rect);
    }
}
