mod contact;
mod hero;
mod page_view;
mod progress_bar;
mod section;
mod status_bar;

use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders};

pub use contact::ContactWidget;
pub use hero::HeroWidget;
pub use page_view::PageWidget;
pub use progress_bar::ProgressBarWidget;
pub use section::SectionWidget;
pub use status_bar::StatusBarWidget;

/// A page block positioned on screen and clipped to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub area: Rect,
    /// Rows of the block cut off above the viewport
    pub skip: u16,
    pub full_height: u16,
}

impl Placement {
    pub fn is_clipped_bottom(&self) -> bool {
        self.skip + self.area.height < self.full_height
    }

    /// Bordered block that drops the borders of clipped edges
    pub fn frame_block(&self) -> Block<'static> {
        let mut borders = Borders::LEFT | Borders::RIGHT;
        if self.skip == 0 {
            borders |= Borders::TOP;
        }
        if !self.is_clipped_bottom() {
            borders |= Borders::BOTTOM;
        }
        Block::default().borders(borders)
    }

    /// Content scroll inside a `frame_block`: the top border absorbs one row
    pub fn content_scroll(&self) -> u16 {
        self.skip.saturating_sub(1)
    }
}

/// Place a block whose top sits `y` rows below the viewport top (negative
/// when above it) within the column `[x, x + width)`
pub fn place(viewport: Rect, x: u16, width: u16, y: i32, height: u16) -> Option<Placement> {
    let bottom = y + height as i32;
    if height == 0 || width == 0 || bottom <= 0 || y >= viewport.height as i32 {
        return None;
    }

    let skip = (-y).max(0) as u16;
    let top = y.max(0) as u16;
    let visible = (height - skip).min(viewport.height - top);
    Some(Placement {
        area: Rect::new(viewport.x + x, viewport.y + top, width, visible),
        skip,
        full_height: height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Rect = Rect {
        x: 0,
        y: 1,
        width: 80,
        height: 20,
    };

    #[test]
    fn test_fully_visible() {
        let p = place(VIEWPORT, 2, 30, 5, 6).unwrap();
        assert_eq!(p.area, Rect::new(2, 6, 30, 6));
        assert_eq!(p.skip, 0);
        assert!(!p.is_clipped_bottom());
    }

    #[test]
    fn test_clipped_at_top() {
        let p = place(VIEWPORT, 0, 80, -2, 6).unwrap();
        assert_eq!(p.area, Rect::new(0, 1, 80, 4));
        assert_eq!(p.skip, 2);
        assert_eq!(p.content_scroll(), 1);
    }

    #[test]
    fn test_clipped_at_bottom() {
        let p = place(VIEWPORT, 0, 80, 17, 6).unwrap();
        assert_eq!(p.area.height, 3);
        assert!(p.is_clipped_bottom());
    }

    #[test]
    fn test_outside_viewport() {
        assert!(place(VIEWPORT, 0, 80, -6, 6).is_none());
        assert!(place(VIEWPORT, 0, 80, 20, 6).is_none());
        assert!(place(VIEWPORT, 0, 0, 3, 6).is_none());
    }
}
