//! Row layout of the landing page
//!
//! The page is a vertical stack of blocks measured in terminal rows. The
//! motion stage works in page pixels, so `Page::layout` scales rows by the
//! configured pixels-per-row.

use staviya_core::content::{CollectionName, LoadState};
use staviya_core::Anchor;

use crate::motion::{ItemLayout, PageLayout, Rect};

const HEADING_ROWS: u16 = 3;
const PLACEHOLDER_ROWS: u16 = 3;
const SECTION_GAP_ROWS: u16 = 2;
const CONTACT_ROWS: u16 = 16;
const FOOTER_ROWS: u16 = 3;
const HERO_MIN_ROWS: u16 = 10;

/// Sections that render a content collection, in page order
pub const CONTENT_SECTIONS: [Anchor; 4] = [
    Anchor::Story,
    Anchor::Services,
    Anchor::Technology,
    Anchor::WhyChoose,
];

#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Hero,
    Heading(Anchor),
    /// Section waiting for content
    Loading(Anchor),
    /// Section whose collection came back empty
    Empty(Anchor),
    Item {
        collection: CollectionName,
        index: usize,
        key: String,
    },
    Contact,
    Footer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    /// First row of the block
    pub top: u32,
    pub height: u16,
    /// Grid column and column count; single-column blocks use (0, 1)
    pub column: u16,
    pub columns: u16,
}

impl Block {
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height as u32)
    }

    pub fn key(&self) -> Option<&str> {
        match &self.kind {
            BlockKind::Item { key, .. } => Some(key.as_str()),
            _ => None,
        }
    }
}

/// Key of an item's reveal and entrance state. Ids are only unique within
/// a collection, so the key is qualified by it.
pub fn motion_key(collection: CollectionName, id: &str) -> String {
    format!("{}/{}", collection, id)
}

/// Grid shape of a collection's cards
fn grid(collection: CollectionName) -> (u16, u16) {
    // (columns, rows per card)
    match collection {
        CollectionName::Milestones => (1, 6),
        CollectionName::Services => (2, 6),
        CollectionName::Technologies => (3, 4),
        CollectionName::Stats => (2, 5),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub blocks: Vec<Block>,
    pub height: u32,
    anchors: Vec<(Anchor, u32)>,
}

impl Page {
    /// Lay out the page for the current content. While content is loading
    /// every section shows a placeholder.
    pub fn build(state: &LoadState, viewport_rows: u16) -> Self {
        let mut page = Page::default();

        page.push(BlockKind::Hero, viewport_rows.max(HERO_MIN_ROWS));

        for anchor in CONTENT_SECTIONS {
            page.anchors.push((anchor, page.height));
            page.push(BlockKind::Heading(anchor), HEADING_ROWS);

            let Some(collection) = anchor.collection() else {
                continue;
            };
            let items = state.items(collection);
            if state.is_loading {
                page.push(BlockKind::Loading(anchor), PLACEHOLDER_ROWS);
            } else if items.is_empty() {
                page.push(BlockKind::Empty(anchor), PLACEHOLDER_ROWS);
            } else {
                let (columns, rows) = grid(collection);
                for (index, item) in items.iter().enumerate() {
                    let column = (index % columns as usize) as u16;
                    let row = saturating_u32(index / columns as usize);
                    page.blocks.push(Block {
                        kind: BlockKind::Item {
                            collection,
                            index,
                            key: motion_key(collection, item.id()),
                        },
                        top: page.height.saturating_add(row.saturating_mul(rows as u32)),
                        height: rows,
                        column,
                        columns,
                    });
                }
                let grid_rows = saturating_u32(items.len().div_ceil(columns as usize));
                page.height = page.height.saturating_add(grid_rows.saturating_mul(rows as u32));
            }
            page.height = page.height.saturating_add(SECTION_GAP_ROWS as u32);
        }

        page.anchors.push((Anchor::Contact, page.height));
        page.push(BlockKind::Contact, CONTACT_ROWS);
        page.push(BlockKind::Footer, FOOTER_ROWS);
        page
    }

    fn push(&mut self, kind: BlockKind, height: u16) {
        self.blocks.push(Block {
            kind,
            top: self.height,
            height,
            column: 0,
            columns: 1,
        });
        self.height = self.height.saturating_add(height as u32);
    }

    pub fn anchor_row(&self, anchor: Anchor) -> Option<u32> {
        self.anchors
            .iter()
            .find(|(a, _)| *a == anchor)
            .map(|(_, row)| *row)
    }

    /// Section whose area contains `row`
    pub fn section_at(&self, row: u32) -> Option<Anchor> {
        self.anchors
            .iter()
            .take_while(|(_, top)| *top <= row)
            .last()
            .map(|(anchor, _)| *anchor)
    }

    pub fn items(&self) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(|block| matches!(block.kind, BlockKind::Item { .. }))
    }

    /// Geometry handed to the motion stage
    pub fn layout(&self, viewport_rows: u16, px_per_row: f64) -> PageLayout {
        let px = |rows: u32| rows as f64 * px_per_row;
        PageLayout {
            viewport_height: px(viewport_rows as u32),
            content_height: px(self.height),
            anchors: self
                .anchors
                .iter()
                .map(|(anchor, row)| (*anchor, px(*row)))
                .collect(),
            items: self
                .blocks
                .iter()
                .filter_map(|block| match &block.kind {
                    BlockKind::Item {
                        collection, key, ..
                    } => Some(ItemLayout {
                        key: key.clone(),
                        collection: *collection,
                        bounds: Rect::new(px(block.top), px(block.height as u32)),
                    }),
                    _ => None,
                })
                .collect(),
        }
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
