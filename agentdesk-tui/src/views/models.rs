//! Model configuration view. The API key is write-only and never shown.

use crate::app::App;
use crate::nav::View;
use crate::theme::{enabled_badge, model_kind_badge};
use crate::views::helpers::{list_detail_layout, page_summary, render_list, render_status};
use crate::widgets::DetailPanel;
use agentdesk_core::{ModelConfig, ModelParamsShape};
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
    let slice = &state.models;

    let items: Vec<ListItem> = slice
        .items
        .iter()
        .map(|model| {
            let kind = model_kind_badge(model.config.kind(), &app.theme);
            let enabled = enabled_badge(model.is_enabled, &app.theme);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<24} ", model.model_name)),
                Span::styled(format!("{:<10} ", kind.label), Style::default().fg(kind.color)),
                Span::styled(enabled.label, Style::default().fg(enabled.color)),
            ]))
        })
        .collect();
    let selected = app.selected_index(View::Models);
    render_list(f, app, list_area, "Model configurations", items, Some(selected));
    render_status(f, app, slice, page_summary(&slice.pagination), status_area);

    let detail = match slice.items.get(selected) {
        Some(model) => detail_for(app, model),
        None => DetailPanel::new("Details", Style::default()),
    };
    detail.render(f, detail_area);
}

fn detail_for<'a>(app: &App, model: &'a ModelConfig) -> DetailPanel<'a> {
    let detail = DetailPanel::new("Details", Style::default().fg(app.theme.secondary))
        .field("ID", model.id.to_string())
        .field("Model", model.model_name.as_str())
        .field("Base URL", model.base_api_url.as_str())
        .field("API key", "********")
        .field("Weight", model.weight.to_string())
        .field("Priority", model.priority.to_string())
        .field("Enabled", enabled_badge(model.is_enabled, &app.theme))
        .field("Kind", model_kind_badge(model.config.kind(), &app.theme));
    let show = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
    match &model.config {
        ModelParamsShape::Chat(params) => detail
            .field("Temperature", show(params.temperature.map(|v| v.to_string())))
            .field("Max tokens", show(params.max_tokens.map(|v| v.to_string())))
            .field("Top p", show(params.top_p.map(|v| v.to_string()))),
        ModelParamsShape::Embedding(params) => detail.field("Dimensions", params.dimensions.to_string()),
        ModelParamsShape::Image(params) => detail
            .field("Size", params.size.as_str())
            .field("Quality", params.quality.as_str()),
    }
}
