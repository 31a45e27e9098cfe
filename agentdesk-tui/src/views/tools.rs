//! Tool catalogue view.

use crate::app::App;
use crate::nav::View;
use crate::theme::{enabled_badge, tool_type_badge};
use crate::views::helpers::{list_detail_layout, page_summary, render_list, render_status};
use crate::widgets::DetailPanel;
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
    let slice = &state.tools;

    let items: Vec<ListItem> = slice
        .items
        .iter()
        .map(|tool| {
            let kind = tool_type_badge(tool.tool_type, &app.theme);
            let enabled = enabled_badge(tool.enabled, &app.theme);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<24} ", tool.name)),
                Span::styled(format!("{:<10} ", kind.label), Style::default().fg(kind.color)),
                Span::styled(enabled.label, Style::default().fg(enabled.color)),
            ]))
        })
        .collect();
    let selected = app.selected_index(View::Tools);
    render_list(f, app, list_area, "Tools", items, Some(selected));
    render_status(f, app, slice, page_summary(&slice.pagination), status_area);

    let mut detail = DetailPanel::new("Details", Style::default().fg(app.theme.secondary));
    if let Some(tool) = slice.items.get(selected) {
        let config = serde_json::to_string_pretty(&tool.config_params).unwrap_or_default();
        detail = detail
            .field("ID", tool.id.to_string())
            .field("Name", tool.name.as_str())
            .field("Type", tool_type_badge(tool.tool_type, &app.theme))
            .field("Endpoint", tool.endpoint.as_str())
            .field("Description", tool.description.as_str())
            .field("Enabled", enabled_badge(tool.enabled, &app.theme))
            .field("Config", config)
            .field(
                "Created",
                tool.created_at
                    .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            );
    }
    detail.render(f, detail_area);
}
