//! Overview with one counter per resource.

use crate::app::App;
use crate::theme::invocation_status_badge;
use crate::views::helpers::render_list;
use agentdesk_core::InvocationStatus;
use agentdesk_store::{AppState, Slice};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, state: &AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let counts = App::dashboard_counts(state);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, counts.len() as u32); 4])
        .split(rows[0]);
    let busy = [
        state.agents.loading(),
        state.tools.loading(),
        state.models.loading(),
        state.agent_triggers.loading(),
    ];
    for (index, (label, total)) in counts.iter().enumerate() {
        let value = if busy[index] { "...".to_string() } else { total.to_string() };
        let card = Paragraph::new(Line::from(Span::styled(
            value,
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().title(*label).borders(Borders::ALL));
        f.render_widget(card, cards[index]);
    }

    let failed = state
        .agent_triggers
        .items
        .iter()
        .filter(|record| record.status == InvocationStatus::Failed)
        .count();
    let items: Vec<ListItem> = state
        .agent_triggers
        .items
        .iter()
        .map(|record| {
            let badge = invocation_status_badge(record.status, &app.theme);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<8}", badge.label), Style::default().fg(badge.color)),
                Span::raw(format!("{}  {}", record.agent_name, record.query)),
            ]))
        })
        .collect();
    let title = format!("Recent invocations ({} failed)", failed);
    render_list(f, app, rows[1], &title, items, None);
}
