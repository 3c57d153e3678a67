//! Document layout
//!
//! Turns the portfolio into a vertical stack of blocks positioned in page
//! pixels. One terminal row is `ROW_PX` pixels tall. Section bounds feed the
//! nav highlighter; block bounds feed the visibility observers.

use serde::Serialize;

use crate::models::{Portfolio, SectionKind};

/// Page pixels per terminal row
pub const ROW_PX: u32 = 20;

/// Rows used by the hero banner
pub const HERO_ROWS: u32 = 7;
/// Rows used by a section heading (title + rule)
pub const HEADING_ROWS: u32 = 2;
/// Rows used by the stats strip
pub const STATS_ROWS: u32 = 4;
/// Rows used by the contact form
pub const FORM_ROWS: u32 = 15;
/// Rows reserved for a deferred card image
pub const IMAGE_ROWS: u32 = 6;

/// Identifies an observable element on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    Section(usize),
    Card { section: usize, card: usize },
    Stat { section: usize, stat: usize },
    Image { section: usize, card: usize },
}

/// What a block renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Hero,
    Heading,
    Text { line: usize },
    Card { card: usize },
    Stats,
    Form,
    Spacer,
}

/// A laid-out block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub section: usize,
    pub kind: BlockKind,
    pub top: u32,
    pub height: u32,
}

impl Block {
    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }

    pub fn rows(&self) -> u32 {
        self.height / ROW_PX
    }
}

/// Vertical extent of a section, `[top, top + height)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionBounds {
    pub id: String,
    pub title: String,
    pub top: u32,
    pub height: u32,
}

impl SectionBounds {
    pub fn contains(&self, y: u32) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Visible window of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub top: u32,
    pub height: u32,
}

impl Viewport {
    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// Laid-out page
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
    pub sections: Vec<SectionBounds>,
    pub height: u32,
}

/// Rows a card occupies: borders, title, optional subtitle, lines, tags, image
pub fn card_rows(card: &crate::models::Card) -> u32 {
    let mut rows = 2 + 1 + card.lines.len() as u32;
    if card.subtitle.is_some() {
        rows += 1;
    }
    if !card.tags.is_empty() {
        rows += 1;
    }
    if card.image.is_some() {
        rows += IMAGE_ROWS;
    }
    rows
}

impl Document {
    pub fn layout(portfolio: &Portfolio) -> Self {
        let mut blocks = Vec::new();
        let mut sections = Vec::with_capacity(portfolio.sections.len());
        let mut y = 0u32;

        fn push(blocks: &mut Vec<Block>, section: usize, kind: BlockKind, rows: u32, y: &mut u32) {
            let height = rows * ROW_PX;
            blocks.push(Block {
                section,
                kind,
                top: *y,
                height,
            });
            *y += height;
        }

        for (index, section) in portfolio.sections.iter().enumerate() {
            let top = y;

            if section.kind == SectionKind::Hero {
                push(&mut blocks, index, BlockKind::Hero, HERO_ROWS, &mut y);
            } else {
                push(&mut blocks, index, BlockKind::Heading, HEADING_ROWS, &mut y);
            }
            for line in 0..section.lines.len() {
                push(&mut blocks, index, BlockKind::Text { line }, 1, &mut y);
            }
            if !section.stats.is_empty() {
                push(&mut blocks, index, BlockKind::Stats, STATS_ROWS, &mut y);
            }
            for (card_index, card) in section.cards.iter().enumerate() {
                push(
                    &mut blocks,
                    index,
                    BlockKind::Card { card: card_index },
                    card_rows(card),
                    &mut y,
                );
            }
            if section.kind == SectionKind::Contact {
                push(&mut blocks, index, BlockKind::Form, FORM_ROWS, &mut y);
            }
            push(&mut blocks, index, BlockKind::Spacer, 1, &mut y);

            sections.push(SectionBounds {
                id: section.id.clone(),
                title: section.title.clone(),
                top,
                height: y - top,
            });
        }

        Self {
            blocks,
            sections,
            height: y,
        }
    }

    /// Bounds of an element as `(top, height)`
    pub fn bounds(&self, element: ElementId) -> Option<(u32, u32)> {
        match element {
            ElementId::Section(index) => self.sections.get(index).map(|s| (s.top, s.height)),
            ElementId::Card { section, card } | ElementId::Image { section, card } => self
                .blocks
                .iter()
                .find(|b| b.section == section && b.kind == BlockKind::Card { card })
                .map(|b| (b.top, b.height)),
            ElementId::Stat { section, .. } => self
                .blocks
                .iter()
                .find(|b| b.section == section && b.kind == BlockKind::Stats)
                .map(|b| (b.top, b.height)),
        }
    }

    /// Blocks overlapping the viewport, in page order
    pub fn visible(&self, viewport: Viewport) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(move |b| b.bottom() > viewport.top && b.top < viewport.bottom())
    }

    /// Largest valid scroll offset for a viewport height
    pub fn max_offset(&self, viewport_height: u32) -> u32 {
        self.height.saturating_sub(viewport_height)
    }
}
