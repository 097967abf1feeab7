use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use staviya_core::CallToAction;

use super::Placement;
use crate::theme::Theme;

const BADGE: &str = "◢ System Online v2.0 ◣";
const TAGLINE: &str = "Staviya Software Solutions engineers the digital architecture of tomorrow. \
     We transform complex challenges into elegant, geometric precision.";

pub struct HeroWidget;

impl HeroWidget {
    /// Render the hero faded to `opacity`. Parallax is applied by the caller
    /// through the placement.
    pub fn render(frame: &mut Frame, placement: Placement, theme: &Theme, opacity: f64) {
        let fg = |color| Style::default().fg(theme.fade(color, opacity));
        let width = placement.area.width.max(1) as usize;
        let tagline_rows = TAGLINE.chars().count().div_ceil(width) as u16;

        let mut lines = vec![
            Line::from(Span::styled(BADGE, fg(theme.primary))),
            Line::from(""),
            Line::from(Span::styled(
                "F U T U R E",
                fg(theme.foreground).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "F O R W A R D",
                fg(theme.primary).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(TAGLINE, fg(theme.muted))),
            Line::from(""),
            Line::from(vec![
                Span::styled("[i] ", fg(theme.secondary)),
                Span::styled(
                    CallToAction::InitiateProject.label(),
                    fg(theme.background).bg(theme.fade(theme.primary, opacity)),
                ),
                Span::raw("    "),
                Span::styled("[e] ", fg(theme.secondary)),
                Span::styled(CallToAction::ExploreSystems.label(), fg(theme.primary)),
            ]),
        ];

        // Vertically center within the full hero, not the visible part
        let content_rows = lines.len() as u16 - 1 + tagline_rows;
        let pad = placement.full_height.saturating_sub(content_rows) / 2;
        let mut padded = vec![Line::from(""); pad as usize];
        padded.append(&mut lines);

        let paragraph = Paragraph::new(padded)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .scroll((placement.skip, 0));
        frame.render_widget(paragraph, placement.area);
    }
}
