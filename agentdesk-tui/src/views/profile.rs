//! Signed-in user's profile.

use crate::app::App;
use crate::widgets::{DetailPanel, SliceStatus};
use agentdesk_store::{AppState, Slice};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, state: &AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let mut detail = DetailPanel::new("Profile", Style::default().fg(app.theme.secondary));
    if let Some(user) = &state.auth.user {
        detail = detail
            .field("ID", user.id.to_string())
            .field("Email", user.email.as_str())
            .field("Username", user.username.clone().unwrap_or_else(|| "-".to_string()))
            .field("Role", user.role.clone().unwrap_or_else(|| "-".to_string()));
    }
    detail.render(f, rows[0]);

    SliceStatus {
        loading: state.auth.loading(),
        error: state.auth.error(),
        summary: String::new(),
    }
    .render(f, rows[1], &app.theme);
}
