use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Focus};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let focus_str = match app.focus {
            Focus::Page => "PAGE",
            Focus::Form(_) => "FORM",
        };
        let section = app
            .current_section()
            .map(|anchor| anchor.label())
            .unwrap_or("Home");

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let loading = if app.content.is_loading { " | loading" } else { "" };
            format!(
                " {} | {} | {:>3.0}%{}",
                focus_str,
                section,
                app.stage.progress() * 100.0,
                loading
            )
        };

        let help_hint = match app.focus {
            Focus::Page => " q:quit j/k:scroll 1-5:sections i/e:buttons c:contact ",
            Focus::Form(_) => " Tab:next Enter:send Esc:back ",
        };
        let padding_len = area
            .width
            .saturating_sub(status_text.width() as u16 + help_hint.width() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(theme.foreground).bg(theme.surface),
            ),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.surface)),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.surface)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
