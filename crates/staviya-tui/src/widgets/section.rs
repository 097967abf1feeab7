use std::time::Instant;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use staviya_core::content::ContentItem;
use staviya_core::Anchor;

use super::Placement;
use crate::motion::{MotionStage, Pose, TIMELINE_NODE_DELAY};
use crate::page::motion_key;
use crate::theme::Theme;

/// Static copy of a content section
struct SectionCopy {
    label: &'static str,
    title: &'static str,
    tagline: &'static str,
    loading: &'static str,
    empty: &'static str,
}

fn copy(anchor: Anchor) -> SectionCopy {
    match anchor {
        Anchor::Story => SectionCopy {
            label: "Our Legacy",
            title: "The Evolution of Excellence",
            tagline: "",
            loading: "Loading our story...",
            empty: "No milestones available",
        },
        Anchor::Services => SectionCopy {
            label: "Capabilities",
            title: "Core Services",
            tagline: "Engineered solutions designed to scale, perform, and transform your digital infrastructure.",
            loading: "Loading services...",
            empty: "No services available",
        },
        Anchor::Technology => SectionCopy {
            label: "Tech Stack",
            title: "Powered by Innovation",
            tagline: "",
            loading: "Loading technologies...",
            empty: "No technologies available",
        },
        Anchor::WhyChoose => SectionCopy {
            label: "Why Staviya",
            title: "Data-Driven Excellence",
            tagline: "Enterprise Security · Rapid Deployment · Award-Winning Team",
            loading: "Loading stats...",
            empty: "No stats available",
        },
        Anchor::Contact => SectionCopy {
            label: "Contact",
            title: "Initiate Collaboration",
            tagline: "",
            loading: "",
            empty: "",
        },
    }
}

pub struct SectionWidget;

impl SectionWidget {
    pub fn render_heading(frame: &mut Frame, placement: Placement, anchor: Anchor, theme: &Theme) {
        let copy = copy(anchor);
        let title_color = if anchor == Anchor::Technology {
            theme.magenta
        } else {
            theme.foreground
        };

        let lines = vec![
            Line::from(Span::styled(
                format!("── {} ──", copy.label.to_uppercase()),
                Style::default().fg(theme.primary),
            )),
            Line::from(Span::styled(
                copy.title,
                Style::default().fg(title_color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(copy.tagline, Style::default().fg(theme.muted))),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .scroll((placement.skip, 0));
        frame.render_widget(paragraph, placement.area);
    }

    /// Loading or empty placeholder of a section
    pub fn render_placeholder(
        frame: &mut Frame,
        placement: Placement,
        anchor: Anchor,
        loading: bool,
        theme: &Theme,
    ) {
        let copy = copy(anchor);
        let text = if loading { copy.loading } else { copy.empty };
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                text,
                Style::default().fg(theme.muted).add_modifier(Modifier::ITALIC),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .scroll((placement.skip, 0));
        frame.render_widget(paragraph, placement.area);
    }

    /// Render one content card in its current entrance pose
    pub fn render_item(
        frame: &mut Frame,
        placement: Placement,
        item: &ContentItem,
        pose: Pose,
        stage: &MotionStage,
        now: Instant,
        theme: &Theme,
    ) {
        if pose.opacity <= 0.0 {
            return;
        }
        let area = inset(placement.area, pose.scale);
        let fg = |color| Style::default().fg(theme.fade(color, pose.opacity));

        let mut lines: Vec<Line> = Vec::new();
        let title = item.title().unwrap_or("Untitled");
        match item {
            ContentItem::Milestone(milestone) => {
                // The node marker trails its card
                let key = motion_key(item.collection(), item.id());
                let node = stage.pose_after(&key, now, TIMELINE_NODE_DELAY);
                let year = milestone
                    .year
                    .map(|y| y.to_string())
                    .unwrap_or_default();
                lines.push(Line::from(vec![
                    Span::styled("◆ ", Style::default().fg(theme.fade(theme.primary, node.opacity))),
                    Span::styled(year, fg(theme.secondary).add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(title, fg(theme.foreground).add_modifier(Modifier::BOLD)),
                ]));
                if let Some(body) = item.body() {
                    lines.push(Line::from(Span::styled(body, fg(theme.muted))));
                }
                if let Some(summary) = milestone.short_summary.as_deref() {
                    lines.push(Line::from(Span::styled(summary, fg(theme.foreground))));
                }
            }
            ContentItem::Stat(stat) => {
                let value = stat.display_value().unwrap_or_else(|| "n/a".to_string());
                lines.push(Line::from(Span::styled(
                    value,
                    fg(theme.secondary).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(Span::styled(title, fg(theme.foreground))));
                if let Some(body) = item.body() {
                    lines.push(Line::from(Span::styled(body, fg(theme.muted))));
                }
            }
            ContentItem::Service(_) | ContentItem::Technology(_) => {
                lines.push(Line::from(Span::styled(
                    title,
                    fg(theme.primary).add_modifier(Modifier::BOLD),
                )));
                if let Some(body) = item.body() {
                    lines.push(Line::from(Span::styled(body, fg(theme.muted))));
                }
            }
        }
        if item.link().is_some() {
            lines.push(Line::from(Span::styled("↗ [o] open link", fg(theme.secondary))));
        }

        let block = placement
            .frame_block()
            .border_style(fg(theme.surface))
            .style(Style::default().bg(theme.background));
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .scroll((placement.content_scroll(), 0));
        frame.render_widget(paragraph, area);
    }
}

/// Shrink `area` horizontally around its center by `scale`
fn inset(area: Rect, scale: f64) -> Rect {
    let scale = scale.clamp(0.0, 1.0);
    let margin = ((1.0 - scale) * area.width as f64 / 2.0).round() as u16;
    let width = area.width.saturating_sub(margin * 2).max(1);
    Rect::new(area.x + margin, area.y, width, area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inset_scales_width() {
        let area = Rect::new(10, 3, 40, 4);
        assert_eq!(inset(area, 1.0), area);
        assert_eq!(inset(area, 0.9), Rect::new(12, 3, 36, 4));
        assert_eq!(inset(area, 0.0).width, 1);
    }

    #[test]
    fn test_every_section_has_copy() {
        for anchor in crate::page::CONTENT_SECTIONS {
            let copy = copy(anchor);
            assert!(!copy.title.is_empty());
            assert!(!copy.loading.is_empty());
            assert!(!copy.empty.is_empty());
        }
    }
}
