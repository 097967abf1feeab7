use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::Theme;

/// One-row bar showing the spring-filtered scroll progress
pub struct ProgressBarWidget;

impl ProgressBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, progress: f64, theme: &Theme) {
        let (filled, rest) = split(area.width, progress);
        let line = Line::from(vec![
            Span::styled("━".repeat(filled as usize), Style::default().fg(theme.primary)),
            Span::styled("─".repeat(rest as usize), Style::default().fg(theme.surface)),
        ]);
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(theme.background)),
            area,
        );
    }
}

/// Filled and remaining cells for `progress` in [0, 1]
fn split(width: u16, progress: f64) -> (u16, u16) {
    let filled = (width as f64 * progress.clamp(0.0, 1.0)).round() as u16;
    let filled = filled.min(width);
    (filled, width - filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        assert_eq!(split(80, 0.0), (0, 80));
        assert_eq!(split(80, 0.5), (40, 40));
        assert_eq!(split(80, 1.0), (80, 0));
        assert_eq!(split(80, 1.7), (80, 0));
        assert_eq!(split(80, -0.2), (0, 80));
    }
}
