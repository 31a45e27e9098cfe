//! Layout and list helpers shared by the list views.

use crate::app::App;
use crate::widgets::SliceStatus;
use agentdesk_core::Pagination;
use agentdesk_store::Slice;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// List on the left, detail on the right, status line underneath.
pub fn list_detail_layout(area: Rect, left_percent: u16) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(left_percent),
            Constraint::Percentage(100 - left_percent),
        ])
        .split(rows[0]);
    (columns[0], columns[1], rows[1])
}

pub fn page_summary(pagination: &Pagination) -> String {
    format!(
        "Page {}/{} • {} total",
        pagination.page,
        pagination.total_pages.max(1),
        pagination.total
    )
}

pub fn render_list(
    f: &mut Frame<'_>,
    app: &App,
    area: Rect,
    title: &str,
    items: Vec<ListItem<'_>>,
    selected: Option<usize>,
) {
    let mut state = ListState::default();
    if !items.is_empty() {
        state.select(selected);
    }
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().fg(app.theme.primary).bg(app.theme.bg_highlight))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut state);
}

pub fn render_status<S: Slice>(f: &mut Frame<'_>, app: &App, slice: &S, summary: String, area: Rect) {
    SliceStatus {
        loading: slice.loading(),
        error: slice.error(),
        summary,
    }
    .render(f, area, &app.theme);
}
