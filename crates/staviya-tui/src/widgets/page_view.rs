use std::time::Instant;

use chrono::Datelike;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

use super::{place, ContactWidget, HeroWidget, Placement, SectionWidget};
use crate::app::App;
use crate::page::BlockKind;
use crate::theme::Theme;

/// Horizontal margin around the page content
const SIDE_MARGIN: u16 = 2;

/// The scrolling landing page
pub struct PageWidget;

impl PageWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, now: Instant) {
        let theme = &app.theme;
        frame.render_widget(Block::default().style(Style::default().bg(theme.background)), area);

        let px_per_row = app.px_per_row();
        let scroll_row = app.scroll_row();

        for block in &app.page.blocks {
            let mut y = block.top as f64 - scroll_row;
            let pose = block.key().map(|key| app.stage.pose(key, now));
            match (&block.kind, pose) {
                (BlockKind::Hero, _) => y += app.stage.hero_offset() / px_per_row,
                (_, Some(pose)) => y += pose.offset_y / px_per_row,
                _ => {}
            }

            let (x, width) = column_span(area.width, block.column, block.columns);
            let Some(placement) = place(area, x, width, y.round() as i32, block.height) else {
                continue;
            };

            // The hero drifts under later blocks
            if block.kind != BlockKind::Hero {
                clear(frame, placement, theme);
            }

            match &block.kind {
                BlockKind::Hero => {
                    HeroWidget::render(frame, placement, theme, app.stage.hero_opacity())
                }
                BlockKind::Heading(anchor) => {
                    SectionWidget::render_heading(frame, placement, *anchor, theme)
                }
                BlockKind::Loading(anchor) => {
                    SectionWidget::render_placeholder(frame, placement, *anchor, true, theme)
                }
                BlockKind::Empty(anchor) => {
                    SectionWidget::render_placeholder(frame, placement, *anchor, false, theme)
                }
                BlockKind::Item { .. } => {
                    if let (Some(item), Some(pose)) = (app.item(&block.kind), pose) {
                        SectionWidget::render_item(
                            frame, placement, item, pose, &app.stage, now, theme,
                        );
                    }
                }
                BlockKind::Contact => ContactWidget::render(frame, placement, app),
                BlockKind::Footer => render_footer(frame, placement, theme),
            }
        }
    }
}

/// Column `column` of `columns` equal columns inside the side margins,
/// one cell of gutter between neighbours
fn column_span(width: u16, column: u16, columns: u16) -> (u16, u16) {
    let margin = if width > SIDE_MARGIN * 4 { SIDE_MARGIN } else { 0 };
    let inner = width - margin * 2;
    let columns = columns.max(1);
    let step = inner / columns;
    let x = margin + column * step;
    if column + 1 >= columns {
        (x, inner - column * step)
    } else {
        (x, step.saturating_sub(1))
    }
}

fn clear(frame: &mut Frame, placement: Placement, theme: &Theme) {
    frame.render_widget(Clear, placement.area);
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        placement.area,
    );
}

fn render_footer(frame: &mut Frame, placement: Placement, theme: &Theme) {
    let year = chrono::Local::now().year();
    let lines = vec![
        Line::from(Span::styled(
            "─".repeat(placement.area.width as usize),
            Style::default().fg(theme.surface),
        )),
        Line::from(Span::styled(
            format!("© {} Staviya Software Solutions. All rights reserved.", year),
            Style::default().fg(theme.muted),
        )),
        Line::from(Span::styled(
            "hello@staviya.com  ·  +1 (555) 123-4567  ·  San Francisco, CA",
            Style::default().fg(theme.muted),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .scroll((placement.skip, 0));
    frame.render_widget(paragraph, placement.area);
}
