//! Invocation history with its filter.

use crate::app::App;
use crate::nav::View;
use crate::theme::invocation_status_badge;
use crate::views::helpers::{list_detail_layout, page_summary, render_list, render_status};
use crate::widgets::DetailPanel;
use agentdesk_core::TriggerQuery;
use agentdesk_store::AppState;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::ListItem,
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, state: &AppState, area: Rect) {
    let (list_area, detail_area, status_area) = list_detail_layout(area, 55);
    let slice = &state.agent_triggers;

    let items: Vec<ListItem> = slice
        .items
        .iter()
        .map(|record| {
            let status = invocation_status_badge(record.status, &app.theme);
            let at = record
                .created_at
                .map(|at| at.format("%m-%d %H:%M").to_string())
                .unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<12} {:<20} ", at, record.agent_name)),
                Span::styled(status.label, Style::default().fg(status.color)),
            ]))
        })
        .collect();
    let selected = app.selected_index(View::Triggers);
    let title = format!("Invocations [{}]", filter_summary(&slice.extra));
    render_list(f, app, list_area, &title, items, Some(selected));
    render_status(f, app, slice, page_summary(&slice.pagination), status_area);

    let mut detail = DetailPanel::new("Details", Style::default().fg(app.theme.secondary));
    if let Some(record) = slice.items.get(selected) {
        let tool_results = record
            .tool_results
            .as_ref()
            .and_then(|value| serde_json::to_string_pretty(value).ok())
            .unwrap_or_else(|| "-".to_string());
        detail = detail
            .field("ID", record.id.to_string())
            .field("Agent", record.agent_name.as_str())
            .field("Status", invocation_status_badge(record.status, &app.theme))
            .field("Duration", format!("{:.2}s", record.cost_time))
            .field("Query", record.query.as_str())
            .field("Response", record.response.as_str())
            .field("Tools used", record.used_tools.join(", "))
            .field("Tool results", tool_results);
    }
    detail.render(f, detail_area);
}

fn filter_summary(query: &TriggerQuery) -> String {
    let mut parts = Vec::new();
    if let Some(agent_id) = &query.agent_id {
        parts.push(format!("agent={}", agent_id));
    }
    if let Some(status) = query.status {
        parts.push(format!("status={}", status));
    }
    if query.start_time.is_some() || query.end_time.is_some() {
        parts.push("date range".to_string());
    }
    if parts.is_empty() {
        "all".to_string()
    } else {
        parts.join(", ")
    }
}
