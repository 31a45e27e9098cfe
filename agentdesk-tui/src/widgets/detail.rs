//! Detail panel widget for showing field/value pairs.

use crate::theme::Badge;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// One row of the panel: plain text or a colored enum label.
pub enum DetailValue {
    Text(String),
    Badge(Badge),
}

impl From<String> for DetailValue {
    fn from(value: String) -> Self {
        DetailValue::Text(value)
    }
}

impl From<&str> for DetailValue {
    fn from(value: &str) -> Self {
        DetailValue::Text(value.to_string())
    }
}

impl From<Badge> for DetailValue {
    fn from(badge: Badge) -> Self {
        DetailValue::Badge(badge)
    }
}

pub struct DetailPanel<'a> {
    pub title: &'a str,
    pub fields: Vec<(&'a str, DetailValue)>,
    pub style: Style,
}

impl<'a> DetailPanel<'a> {
    pub fn new(title: &'a str, style: Style) -> Self {
        Self {
            title,
            fields: Vec::new(),
            style,
        }
    }

    pub fn field(mut self, label: &'a str, value: impl Into<DetailValue>) -> Self {
        self.fields.push((label, value.into()));
        self
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let lines: Vec<Line> = self
            .fields
            .iter()
            .map(|(label, value)| {
                let value = match value {
                    DetailValue::Text(text) => Span::raw(text.clone()),
                    DetailValue::Badge(badge) => {
                        Span::styled(badge.label, Style::default().fg(badge.color))
                    }
                };
                Line::from(vec![Span::styled(format!("{}: ", label), self.style), value])
            })
            .collect();

        let text = Text::from(lines);
        let widget = Paragraph::new(text)
            .block(Block::default().title(self.title).borders(Borders::ALL))
            .wrap(Wrap { trim: true });

        f.render_widget(widget, area);
    }
}
