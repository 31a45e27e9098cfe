//! Prompt library, optionally scoped to one agent.

use crate::app::App;
use crate::nav::View;
use crate::views::helpers::{list_detail_layout, page_summary, render_list, render_status};
use crate::widgets::DetailPanel;
use agentdesk_store::AppState;
use ratatui::{layout::Rect, style::Style, widgets::ListItem, Frame};

pub fn render(f: &mut Frame<'_>, app: &App, state: &AppState, area: Rect) {
    let (list_area, detail_area, status_area) = list_detail_layout(area, 45);
    let slice = &state.prompts;

    let title = match &slice.extra.agent_id {
        Some(owner) => {
            let name = state
                .agents
                .get(owner)
                .map(|agent| agent.display_name().to_string())
                .unwrap_or_else(|| owner.to_string());
            format!("Prompts of {}", name)
        }
        None => "Prompts".to_string(),
    };
    let items: Vec<ListItem> = slice
        .items
        .iter()
        .map(|prompt| {
            let category = prompt.category.as_deref().unwrap_or("-");
            ListItem::new(format!("{:<24} {}", prompt.name, category))
        })
        .collect();
    let selected = app.selected_index(View::Prompts);
    render_list(f, app, list_area, &title, items, Some(selected));
    let summary = match &slice.extra.agent_id {
        Some(_) => format!("{} prompts", slice.items.len()),
        None => page_summary(&slice.pagination),
    };
    render_status(f, app, slice, summary, status_area);

    let mut detail = DetailPanel::new("Details", Style::default().fg(app.theme.secondary));
    if let Some(prompt) = slice.items.get(selected) {
        detail = detail
            .field("ID", prompt.id.to_string())
            .field("Name", prompt.name.as_str())
            .field(
                "Agent",
                prompt
                    .agent_id
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "-".to_string()),
            )
            .field("Category", prompt.category.clone().unwrap_or_else(|| "-".to_string()))
            .field("Tags", prompt.tags.join(", "))
            .field("Content (zh)", prompt.content_zh.as_str())
            .field("Content (en)", prompt.content_en.as_str());
    }
    detail.render(f, detail_area);
}
