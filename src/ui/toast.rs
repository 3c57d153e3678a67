//! Notification toast

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::App;
use crate::page::notify::{Phase, Severity};
use crate::ui::Theme;

/// Draw the current notification in the top-right corner
pub fn render_toast(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let Some(note) = app.notifier.current() else {
        return;
    };
    let Some(phase) = note.phase(app.now()) else {
        return;
    };
    if area.width < 4 || area.height < 3 {
        return;
    }

    let (icon, style) = match note.severity {
        Severity::Info => ("ℹ", theme.title()),
        Severity::Success => ("✓", theme.success()),
        Severity::Error => ("✗", theme.error()),
    };
    // Fading in or out
    let style = if phase == Phase::Shown {
        style
    } else {
        style.add_modifier(Modifier::DIM)
    };

    frame.render_widget(Clear, area);
    let toast = Paragraph::new(Line::from(vec![
        Span::styled(format!("{} ", icon), style),
        Span::styled(note.message.clone(), theme.surface()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style)
            .style(theme.surface()),
    );
    frame.render_widget(toast, area);
}
