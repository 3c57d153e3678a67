//! Page content rendering
//!
//! Each visible block is drawn into its own scratch buffer at full height,
//! then the rows inside the viewport are copied to the frame. Blocks cut by
//! the top or bottom edge are clipped row by row.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Section;
use crate::page::document::{Block as PageBlock, BlockKind, ElementId, IMAGE_ROWS, ROW_PX};
use crate::page::lazy::ImageState;
use crate::ui::form::render_form;
use crate::ui::Theme;

/// Left/right padding of page content
const GUTTER: u16 = 2;
/// Widest the content column grows
const MAX_COLUMN: u16 = 96;

/// Draw the visible part of the page into `area`
pub fn render_page(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let first_row = app.scroll.offset() / ROW_PX;
    let last_row = first_row + area.height as u32;

    for block in &app.document.blocks {
        let top = block.top / ROW_PX;
        let rows = block.rows();
        if top + rows <= first_row || top >= last_row || rows == 0 {
            continue;
        }

        let scratch_area = Rect::new(0, 0, area.width, rows.min(u16::MAX as u32) as u16);
        let mut scratch = Buffer::empty(scratch_area);
        scratch.set_style(scratch_area, theme.text());
        render_block(&mut scratch, column(scratch_area), app, theme, block);

        let out = frame.buffer_mut();
        for r in 0..rows {
            let page_row = top + r;
            if page_row < first_row || page_row >= last_row {
                continue;
            }
            let y = area.y + (page_row - first_row) as u16;
            for x in 0..area.width {
                if let (Some(src), Some(dst)) =
                    (scratch.cell((x, r as u16)), out.cell_mut((area.x + x, y)))
                {
                    *dst = src.clone();
                }
            }
        }
    }
}

/// Centered content column inside a full-width area
fn column(area: Rect) -> Rect {
    let width = area.width.saturating_sub(GUTTER * 2).min(MAX_COLUMN);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

/// Element whose reveal state governs a block
fn reveal_target(block: &PageBlock) -> ElementId {
    match block.kind {
        BlockKind::Card { card } => ElementId::Card {
            section: block.section,
            card,
        },
        _ => ElementId::Section(block.section),
    }
}

fn render_block(buf: &mut Buffer, area: Rect, app: &App, theme: &Theme, block: &PageBlock) {
    let element = reveal_target(block);
    if !app.is_revealed(element) {
        return;
    }
    let Some(section) = app.portfolio.sections.get(block.section) else {
        return;
    };

    match block.kind {
        BlockKind::Hero => render_hero(buf, area, app, theme),
        BlockKind::Heading => render_heading(buf, area, app, theme, block.section, section),
        BlockKind::Text { line } => {
            if let Some(text) = section.lines.get(line) {
                Paragraph::new(text.as_str())
                    .style(theme.text())
                    .render(area, buf);
            }
        }
        BlockKind::Card { card } => render_card(buf, area, app, theme, block.section, card),
        BlockKind::Stats => render_stats(buf, area, app, theme, block.section, section),
        BlockKind::Form => render_form(buf, area, &app.form, theme),
        BlockKind::Spacer => {}
    }

    if app.is_revealing(element) {
        buf.set_style(area, Style::default().add_modifier(Modifier::DIM));
    }
}

// =============================================================================
// Blocks
// =============================================================================

fn render_hero(buf: &mut Buffer, area: Rect, app: &App, theme: &Theme) {
    let profile = &app.portfolio.profile;
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Hi, I'm ", theme.text()),
            Span::styled(profile.name.clone(), theme.title()),
        ]),
    ];

    if profile.phrases.is_empty() {
        lines.push(Line::from(""));
    } else {
        lines.push(Line::from(vec![
            Span::styled("> ", theme.dimmed()),
            Span::styled(app.typing.text(), theme.accent()),
            Span::styled("▌", theme.secondary()),
        ]));
    }

    lines.push(Line::from(Span::styled(
        profile.tagline.clone().unwrap_or_default(),
        theme.dimmed(),
    )));
    lines.push(Line::from(""));

    let mut hints = Vec::new();
    if app.portfolio.contact_section().is_some() {
        hints.push(("e", "get in touch"));
    }
    hints.extend([("1-9", "jump"), ("t", "theme"), ("q", "quit")]);
    let spans: Vec<Span> = hints
        .into_iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!(" {} ", key), theme.keybind()),
                Span::styled(format!("{}  ", desc), theme.keybind_desc()),
            ]
        })
        .collect();
    lines.push(Line::from(spans));

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn render_heading(
    buf: &mut Buffer,
    area: Rect,
    app: &App,
    theme: &Theme,
    index: usize,
    section: &Section,
) {
    let marker = if app.scroll.active_section() == Some(index) {
        Span::styled("▸ ", theme.accent())
    } else {
        Span::styled("  ", theme.dimmed())
    };
    let rule = "─".repeat(area.width as usize);
    Paragraph::new(vec![
        Line::from(vec![
            marker,
            Span::styled(format!("{}. ", index + 1), theme.dimmed()),
            Span::styled(section.title.clone(), theme.title()),
        ]),
        Line::from(Span::styled(rule, theme.border())),
    ])
    .render(area, buf);
}

fn render_card(buf: &mut Buffer, area: Rect, app: &App, theme: &Theme, section: usize, card: usize) {
    let Some(c) = app
        .portfolio
        .sections
        .get(section)
        .and_then(|s| s.cards.get(card))
    else {
        return;
    };

    let border = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border());
    let inner = border.inner(area);
    border.render(area, buf);

    let mut lines = vec![Line::from(Span::styled(c.title.clone(), theme.selected()))];
    if let Some(subtitle) = &c.subtitle {
        lines.push(Line::from(Span::styled(subtitle.clone(), theme.secondary())));
    }
    lines.extend(c.lines.iter().map(|l| Line::from(Span::styled(l.clone(), theme.text()))));
    if !c.tags.is_empty() {
        let tags = c
            .tags
            .iter()
            .map(|t| format!("#{}", t))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(Line::from(Span::styled(tags, theme.keybind())));
    }

    let text_rows = lines.len() as u16;
    Paragraph::new(lines).render(inner, buf);

    let image = ElementId::Image { section, card };
    if let Some(state) = app.images.state(image) {
        let image_area = Rect::new(
            inner.x,
            inner.y + text_rows,
            inner.width,
            (IMAGE_ROWS as u16).min(inner.height.saturating_sub(text_rows)),
        );
        render_image(buf, image_area, state, theme);
    }
}

fn render_image(buf: &mut Buffer, area: Rect, state: &ImageState, theme: &Theme) {
    let paragraph = match state {
        ImageState::Deferred(_) | ImageState::Loading(_) => {
            Paragraph::new(Span::styled("⟳ loading image...", theme.dimmed()))
                .alignment(Alignment::Center)
        }
        ImageState::Loaded(art) => Paragraph::new(
            art.lines()
                .take(IMAGE_ROWS as usize)
                .map(|l| Line::from(l.to_string()))
                .collect::<Vec<_>>(),
        )
        .style(theme.secondary())
        .alignment(Alignment::Center),
        ImageState::Failed => {
            Paragraph::new(Span::styled("[image unavailable]", theme.dimmed()))
                .alignment(Alignment::Center)
        }
    };
    paragraph.render(area, buf);
}

fn render_stats(
    buf: &mut Buffer,
    area: Rect,
    app: &App,
    theme: &Theme,
    index: usize,
    section: &Section,
) {
    let count = section.stats.len() as u32;
    if count == 0 {
        return;
    }
    let cells = Layout::horizontal((0..count).map(|_| Constraint::Ratio(1, count))).split(area);

    for (stat, (s, cell)) in section.stats.iter().zip(cells.iter()).enumerate() {
        let value = app
            .counter(ElementId::Stat {
                section: index,
                stat,
            })
            .map(|c| c.text())
            .unwrap_or_else(|| s.value.clone());

        Paragraph::new(vec![
            Line::from(Span::styled(value, theme.accent())),
            Line::from(Span::styled(s.label.clone(), theme.dimmed())),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.border()),
        )
        .render(*cell, buf);
    }
}
