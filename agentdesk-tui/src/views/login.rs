//! Sign-in view. The credential form itself is the modal overlay.

use crate::app::App;
use agentdesk_store::{AppState, Slice};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, state: &AppState, area: Rect) {
    let mut lines = vec![
        Line::from("Agent administration console"),
        Line::from(format!("Backend: {}", app.config.api_base_url().unwrap_or("unconfigured"))),
    ];
    if state.auth.loading() {
        lines.push(Line::styled("Signing in...", Style::default().fg(app.theme.info)));
    } else if let Some(error) = state.auth.error() {
        lines.push(Line::styled(error.to_string(), Style::default().fg(app.theme.error)));
    }
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title("Sign in").borders(Borders::ALL));
    f.render_widget(widget, area);
}
