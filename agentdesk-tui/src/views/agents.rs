//! Agent list, detail and the local test chat.

use crate::app::App;
use crate::chat::ChatRole;
use crate::nav::View;
use crate::theme::{agent_status_badge, visibility_badge};
use crate::views::helpers::{list_detail_layout, page_summary, render_list, render_status};
use crate::widgets::DetailPanel;
use agentdesk_core::Agent;
use agentdesk_store::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, state: &AppState, area: Rect) {
    let (list_area, detail_area, status_area) = list_detail_layout(area, 55);
    let slice = &state.agents;

    let items: Vec<ListItem> = slice
        .items
        .iter()
        .map(|agent| {
            let visibility = visibility_badge(agent.visibility, &app.theme);
            let status = agent_status_badge(agent.status, &app.theme);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<24} ", agent.display_name())),
                Span::styled(format!("{:<12} ", visibility.label), Style::default().fg(visibility.color)),
                Span::styled(status.label, Style::default().fg(status.color)),
            ]))
        })
        .collect();
    let selected = app.selected_index(View::Agents);
    render_list(f, app, list_area, "Agents", items, Some(selected));
    render_status(f, app, slice, page_summary(&slice.pagination), status_area);

    let detail_area = match &app.chat {
        Some(_) => {
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .split(detail_area);
            render_chat(f, app, split[1]);
            split[0]
        }
        None => detail_area,
    };
    if let Some(agent) = slice.items.get(selected) {
        render_detail(f, app, agent, detail_area);
    } else {
        DetailPanel::new("Details", Style::default()).render(f, detail_area);
    }
}

fn render_detail(f: &mut Frame<'_>, app: &App, agent: &Agent, area: Rect) {
    let params = agent.model_params.clone().unwrap_or_default();
    let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    DetailPanel::new("Details", Style::default().fg(app.theme.secondary))
        .field("ID", agent.id.to_string())
        .field("Name", agent.name.as_str())
        .field("Name (zh)", optional(&agent.name_zh))
        .field("Name (en)", optional(&agent.name_en))
        .field("Description", agent.description.as_str())
        .field("Pricing", format!("{:.2}", agent.pricing))
        .field("Visibility", visibility_badge(agent.visibility, &app.theme))
        .field("Status", agent_status_badge(agent.status, &app.theme))
        .field("Type", agent.agent_type.as_str())
        .field("Tools", agent.tool_ids.len().to_string())
        .field(
            "Model",
            agent
                .model_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string()),
        )
        .field("Temperature", params.temperature.to_string())
        .field("Max tokens", params.max_tokens.to_string())
        .render(f, area);
}

fn render_chat(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(chat) = &app.chat else {
        return;
    };
    let mut lines: Vec<Line> = chat
        .messages
        .iter()
        .map(|message| {
            let color = match message.role {
                ChatRole::User => app.theme.primary,
                ChatRole::Assistant => app.theme.secondary,
            };
            Line::from(vec![
                Span::styled(format!("{}: ", chat.speaker(message)), Style::default().fg(color)),
                Span::raw(message.content.clone()),
            ])
        })
        .collect();
    lines.push(Line::from(Span::styled(
        format!("> {}_", chat.input),
        Style::default().fg(app.theme.text),
    )));
    let title = format!("Test chat: {}", chat.agent_name);
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border_focus)),
        );
    f.render_widget(widget, area);
}
