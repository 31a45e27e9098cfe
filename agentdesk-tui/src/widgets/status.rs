//! One-line loading/error indicator for a slice.

use crate::theme::Theme;
use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

pub struct SliceStatus<'a> {
    pub loading: bool,
    pub error: Option<&'a str>,
    pub summary: String,
}

impl<'a> SliceStatus<'a> {
    pub fn render(&self, f: &mut Frame<'_>, area: Rect, theme: &Theme) {
        let (text, color) = match (self.loading, self.error) {
            (true, _) => ("Loading...".to_string(), theme.info),
            (false, Some(error)) => (format!("Error: {}", error), theme.error),
            (false, None) => (self.summary.clone(), theme.text_dim),
        };
        f.render_widget(Paragraph::new(text).style(Style::default().fg(color)), area);
    }
}
