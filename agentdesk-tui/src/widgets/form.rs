//! Modal form overlay.

use crate::forms::Form;
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub struct FormWidget<'a> {
    pub form: &'a Form,
    pub theme: &'a Theme,
}

impl<'a> FormWidget<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let height = (self.form.fields.len() as u16 + 5).min(area.height);
        let popup = centered(area, 70, height);
        f.render_widget(Clear, popup);

        let block = Block::default()
            .title(self.form.title.as_str())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focus));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(2)])
            .split(inner);

        let label_width = self
            .form
            .fields
            .iter()
            .map(|field| field.label.len())
            .max()
            .unwrap_or(0);
        let lines: Vec<Line> = self
            .form
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let focused = index == self.form.focus;
                let label_style = if focused {
                    Style::default()
                        .fg(self.theme.primary)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(self.theme.text_dim)
                };
                let cursor = if focused { "_" } else { "" };
                Line::from(vec![
                    Span::styled(format!("{:>width$} ", field.label, width = label_width), label_style),
                    Span::styled(
                        format!("{}{}", field.display(), cursor),
                        Style::default().fg(self.theme.text),
                    ),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(lines), chunks[0]);

        let footer = match (&self.form.error, self.form.submitting) {
            (_, true) => Line::from(Span::styled("Saving...", Style::default().fg(self.theme.info))),
            (Some(error), false) => Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(self.theme.error),
            )),
            (None, false) => Line::from(Span::styled(
                "Tab next field • ←/→ change choice • Enter submit • Esc cancel",
                Style::default().fg(self.theme.text_dim),
            )),
        };
        f.render_widget(Paragraph::new(footer).wrap(Wrap { trim: true }), chunks[1]);
    }
}

/// Rectangle of `percent_x` width and fixed `height`, centered in `area`.
pub fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height: height.min(area.height),
    }
}
