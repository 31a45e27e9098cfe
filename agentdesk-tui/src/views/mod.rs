//! View rendering dispatch.

pub mod agents;
pub mod dashboard;
pub mod helpers;
pub mod login;
pub mod models;
pub mod profile;
pub mod prompts;
pub mod tools;
pub mod triggers;

use crate::app::App;
use crate::nav::View;
use crate::theme::notification_badge;
use crate::widgets::form::centered;
use crate::widgets::FormWidget;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let state = app.store.snapshot();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, app, &state, layout[0]);

    match app.active_view {
        View::Login => login::render(f, app, &state, layout[1]),
        View::Dashboard => dashboard::render(f, app, &state, layout[1]),
        View::Agents => agents::render(f, app, &state, layout[1]),
        View::Tools => tools::render(f, app, &state, layout[1]),
        View::Models => models::render(f, app, &state, layout[1]),
        View::Prompts => prompts::render(f, app, &state, layout[1]),
        View::Triggers => triggers::render(f, app, &state, layout[1]),
        View::Profile => profile::render(f, app, &state, layout[1]),
    }

    render_footer(f, app, layout[2]);

    if let Some(form) = &app.form {
        FormWidget {
            form,
            theme: &app.theme,
        }
        .render(f, layout[1]);
    }
    if let Some(pending) = &app.confirm {
        render_confirm(f, app, &pending.label, layout[1]);
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, state: &agentdesk_store::AppState, area: Rect) {
    let user = state
        .auth
        .user
        .as_ref()
        .map(|user| user.email.as_str())
        .unwrap_or("signed out");
    let title = format!(
        "agentdesk | {} | {}",
        app.config.environment, user
    );
    let block = Block::default().borders(Borders::ALL).title(Span::styled(
        title,
        Style::default().fg(app.theme.primary),
    ));

    if app.active_view == View::Login {
        f.render_widget(block, area);
        return;
    }
    let titles: Vec<Line> = View::all()
        .iter()
        .enumerate()
        .map(|(index, view)| Line::from(format!("{} {}", index + 1, view.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .block(block)
        .select(app.active_view.index().unwrap_or(0))
        .style(Style::default().fg(app.theme.text_dim))
        .highlight_style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn help_text(app: &App) -> &'static str {
    if app.form.is_some() {
        return "Tab next field • Enter submit • Esc cancel";
    }
    if app.confirm.is_some() {
        return "y/Enter confirm • n/Esc cancel";
    }
    if app.chat.is_some() {
        return "type a message • Enter send • Esc close chat";
    }
    match app.active_view {
        View::Login => "Enter sign in • Esc quit",
        View::Dashboard => "1-7 switch view • r refresh • L logout • q quit",
        View::Agents => "j/k move • [ ] page • n new • e edit • c configure • p prompts • m chat • d delete • q quit",
        View::Tools => "j/k move • [ ] page • n new • e edit • t toggle • d delete • q quit",
        View::Models => "j/k move • [ ] page • n new • e edit • t toggle • d delete • q quit",
        View::Prompts => "j/k move • [ ] page • n new • e edit • d delete • p all prompts • q quit",
        View::Triggers => "j/k move • [ ] page • f filter • r refresh • q quit",
        View::Profile => "e edit profile • L logout • q quit",
    }
}

fn render_footer(f: &mut Frame<'_>, app: &App, area: Rect) {
    let (text, style) = match app.notifications.last() {
        Some(note) => {
            let badge = notification_badge(note.level, &app.theme);
            (
                format!("{}: {}", badge.label, note.message),
                Style::default().fg(badge.color),
            )
        }
        None => (
            help_text(app).to_string(),
            Style::default().fg(app.theme.text_dim),
        ),
    };
    let footer = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(style);
    f.render_widget(footer, area);
}

fn render_confirm(f: &mut Frame<'_>, app: &App, label: &str, area: Rect) {
    let popup = centered(area, 50, 5);
    f.render_widget(Clear, popup);
    let text = Paragraph::new(format!("Delete {}? (y/n)", label))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(app.theme.warning))
        .block(
            Block::default()
                .title("Confirm")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.error)),
        );
    f.render_widget(text, popup);
}
