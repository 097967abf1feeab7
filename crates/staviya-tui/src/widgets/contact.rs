use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use staviya_core::form::{FieldError, FormField};

use super::Placement;
use crate::app::{App, Focus};

const INTRO: &str =
    "Ready to transform your vision into a digital reality? Our architects are standing by.";
const INFO: [(&str, &str); 3] = [
    ("Response Time", "< 24 Hours"),
    ("Global Reach", "Remote-First"),
    ("Team Access", "Direct Channel"),
];

pub struct ContactWidget;

impl ContactWidget {
    pub fn render(frame: &mut Frame, placement: Placement, app: &App) {
        let theme = &app.theme;

        let mut lines = vec![
            Line::from(Span::styled(
                "Initiate Collaboration",
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(INTRO, Style::default().fg(theme.muted))),
            Line::from(""),
        ];

        let mut info = Vec::new();
        for (i, (label, value)) in INFO.iter().enumerate() {
            if i > 0 {
                info.push(Span::styled("  ·  ", Style::default().fg(theme.surface)));
            }
            info.push(Span::styled(format!("{} ", label), Style::default().fg(theme.muted)));
            info.push(Span::styled(*value, Style::default().fg(theme.secondary)));
        }
        lines.push(Line::from(info));
        lines.push(Line::from(""));

        if app.form.is_submitted() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "✓ Transmission Received",
                Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                "We will decode your message and respond shortly.",
                Style::default().fg(theme.foreground),
            )));
        } else {
            for field in FormField::ALL {
                lines.push(field_line(app, field));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "[ Send Transmission ]",
                Style::default()
                    .fg(theme.background)
                    .bg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )));
            for error in app.form_errors.iter().take(3) {
                lines.push(Line::from(Span::styled(
                    error.to_string(),
                    Style::default().fg(theme.error),
                )));
            }
            if app.form_errors.is_empty() {
                let hint = match app.focus {
                    Focus::Form(_) => "Tab: next field  Enter: send  Esc: back to page",
                    Focus::Page => "Press c or Tab to fill in the form",
                };
                lines.push(Line::from(Span::styled(hint, Style::default().fg(theme.muted))));
            }
        }

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .scroll((placement.skip, 0));
        frame.render_widget(paragraph, placement.area);
    }
}

fn field_line(app: &App, field: FormField) -> Line<'static> {
    let theme = &app.theme;
    let focused = app.focus == Focus::Form(field);
    let has_error = app.form_errors.iter().any(|e| match e {
        FieldError::Missing(f) => *f == field,
        FieldError::InvalidEmail => field == FormField::Email,
    });

    let marker = if field.is_required() { "*" } else { " " };
    let label_style = if has_error {
        Style::default().fg(theme.error)
    } else if focused {
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted)
    };

    let mut value = app.form.form.field(field).to_string();
    if focused {
        value.push('▏');
    }
    let value_style = if focused {
        Style::default().fg(theme.foreground).bg(theme.surface)
    } else {
        Style::default().fg(theme.foreground)
    };

    Line::from(vec![
        Span::styled(format!("{:>8}{} ", field.label(), marker), label_style),
        Span::styled(format!("{:<32}", value), value_style),
    ])
}
