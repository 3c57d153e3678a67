//! Contact form rendering

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::page::contact::{ContactForm, Field, TextInput};
use crate::ui::Theme;

/// Visible text lines in the message box
const MESSAGE_LINES: u16 = 3;

/// Draw the form into `area` (fifteen rows: three single-line inputs, the
/// message box and a hint line)
pub fn render_form(buf: &mut Buffer, area: Rect, form: &ContactForm, theme: &Theme) {
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(MESSAGE_LINES + 2),
        Constraint::Length(1),
    ])
    .split(area);

    for (field, rect) in Field::ALL.iter().zip(rows.iter()) {
        render_input(buf, *rect, *field, form.field(*field), form.focus() == Some(*field), theme);
    }

    let hint = if form.focus().is_some() {
        Line::from(vec![
            Span::styled("Tab", theme.keybind()),
            Span::styled(" next  ", theme.keybind_desc()),
            Span::styled("Ctrl+S", theme.keybind()),
            Span::styled(" send  ", theme.keybind_desc()),
            Span::styled("Esc", theme.keybind()),
            Span::styled(" done", theme.keybind_desc()),
        ])
    } else {
        Line::from(vec![
            Span::styled("Press ", theme.keybind_desc()),
            Span::styled("e", theme.keybind()),
            Span::styled(" to write a message", theme.keybind_desc()),
        ])
    };
    Paragraph::new(hint).render(rows[4], buf);
}

fn render_input(
    buf: &mut Buffer,
    area: Rect,
    field: Field,
    input: &TextInput,
    focused: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme.border_focused()
        } else {
            theme.border()
        })
        .title(Span::styled(
            format!(" {} ", field.label()),
            if focused { theme.title() } else { theme.dimmed() },
        ))
        .style(theme.input());

    let lines = if focused {
        with_cursor(input, theme)
    } else {
        input
            .value
            .split('\n')
            .map(|l| Line::from(l.to_string()))
            .collect()
    };

    // Keep the last lines in view as the message grows
    let visible = area.height.saturating_sub(2) as usize;
    let skip = lines.len().saturating_sub(visible.max(1));

    Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>())
        .block(block)
        .render(area, buf);
}

/// Lines of an input with a block cursor at the caret
fn with_cursor(input: &TextInput, theme: &Theme) -> Vec<Line<'static>> {
    let (before, after) = input.split();
    let mut after_chars = after.chars();
    let under = match after_chars.next() {
        Some('\n') | None => ' ',
        Some(c) => c,
    };
    let rest: String = if after.starts_with('\n') {
        after.to_string()
    } else {
        after_chars.collect()
    };

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut before_lines = before.split('\n').peekable();
    while let Some(line) = before_lines.next() {
        if before_lines.peek().is_some() {
            lines.push(Line::from(line.to_string()));
            continue;
        }
        // Caret line
        let mut rest_lines = rest.split('\n');
        let tail = rest_lines.next().unwrap_or_default().to_string();
        lines.push(Line::from(vec![
            Span::raw(line.to_string()),
            Span::styled(under.to_string(), theme.input_cursor()),
            Span::raw(tail),
        ]));
        lines.extend(rest_lines.map(|l| Line::from(l.to_string())));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_cursor_at_end() {
        let mut input = TextInput::default();
        input.set("abc");
        let lines = with_cursor(&input, &Theme::LIGHT);
        assert_eq!(lines.len(), 1);
        assert_eq!(text(&lines[0]), "abc ");
    }

    #[test]
    fn test_cursor_mid_multiline() {
        let mut input = TextInput::default();
        input.set("ab\ncd\nef");
        input.home();
        input.right();
        input.right();
        input.right();
        input.right();
        // Caret sits after "ab\nc"
        let lines = with_cursor(&input, &Theme::DARK);
        let rendered: Vec<String> = lines.iter().map(text).collect();
        assert_eq!(rendered, vec!["ab", "cd", "ef"]);
        assert_eq!(lines[1].spans[1].content, "d");
    }

    #[test]
    fn test_cursor_before_newline() {
        let mut input = TextInput::default();
        input.set("ab\ncd");
        input.home();
        input.right();
        input.right();
        let lines = with_cursor(&input, &Theme::DARK);
        let rendered: Vec<String> = lines.iter().map(text).collect();
        assert_eq!(rendered, vec!["ab ", "cd"]);
    }

    #[test]
    fn test_render_form_shows_labels() {
        let area = Rect::new(0, 0, 40, 15);
        let mut buf = Buffer::empty(area);
        let form = ContactForm::new();
        render_form(&mut buf, area, &form, &Theme::LIGHT);

        let all: String = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n");
        for label in ["Name", "Email", "Subject", "Message", "to write a message"] {
            assert!(all.contains(label), "missing {label}");
        }
    }
}
