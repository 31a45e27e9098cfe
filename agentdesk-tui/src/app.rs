//! Presentational state and the key/event handlers.
//!
//! `App` never awaits. Handlers return the [`Command`]s to run and the event
//! loop feeds their [`Settled`] outcome back through [`App::on_settled`].

use crate::chat::ChatPanel;
use crate::commands::{Command, Settled};
use crate::config::TuiConfig;
use crate::forms::{self, Form, FormKind, FormOutcome};
use crate::keys::{map_form_key, map_key, Action};
use crate::nav::{self, View};
use crate::persistence::PersistedState;
use crate::theme::Theme;
use agentdesk_client::{ClientEvent, Notification, NotificationLevel};
use agentdesk_core::{Entity, ListQuery, ModelConfigPatch, Pagination, ResourceId, TriggerQuery};
use agentdesk_store::{AppState, CancellationToken, SliceKey, Store, StoreError};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use std::collections::BTreeMap;

/// Seconds a toast stays on screen.
pub const NOTIFICATION_TTL_SECS: i64 = 5;

/// A delete waiting for the operator to confirm.
#[derive(Debug, Clone)]
pub struct PendingDelete {
    pub label: String,
    pub command: Command,
}

pub struct App {
    pub config: TuiConfig,
    pub store: Store,
    pub theme: Theme,
    pub active_view: View,
    pub notifications: Vec<Notification>,
    pub form: Option<Form>,
    pub confirm: Option<PendingDelete>,
    pub chat: Option<ChatPanel>,
    /// Selected row per list view.
    pub selected: BTreeMap<View, usize>,
    pub page_sizes: BTreeMap<View, u32>,
    /// Agent whose prompts the prompt view lists; `None` lists all prompts.
    pub prompt_owner: Option<ResourceId>,
    pub trigger_filter: TriggerQuery,
    pub should_quit: bool,
    view_token: CancellationToken,
}

impl App {
    pub fn new(config: TuiConfig, store: Store, persisted: Option<PersistedState>) -> Self {
        let mut page_sizes = BTreeMap::new();
        let mut active_view = View::Dashboard;
        if let Some(state) = &persisted {
            active_view = state.active_view;
            for view in View::all().iter().filter(|view| view.is_paged()) {
                if let Some(size) = state.page_size(*view) {
                    page_sizes.insert(*view, size.min(crate::config::MAX_PAGE_SIZE));
                }
            }
        }
        let trigger_filter = TriggerQuery {
            page_size: page_sizes
                .get(&View::Triggers)
                .copied()
                .unwrap_or(config.default_page_size),
            ..TriggerQuery::default()
        };
        let active_view = nav::resolve(active_view, store.session().is_authenticated());
        let form = (active_view == View::Login).then(forms::login);
        Self {
            config,
            store,
            theme: Theme::default(),
            active_view,
            notifications: Vec::new(),
            form,
            confirm: None,
            chat: None,
            selected: BTreeMap::new(),
            page_sizes,
            prompt_owner: None,
            trigger_filter,
            should_quit: false,
            view_token: CancellationToken::new(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.session().is_authenticated()
    }

    /// Commands for the view shown at startup.
    pub fn start(&self) -> Vec<Command> {
        self.enter_commands(self.active_view)
    }

    /// Switch views through the login gate. In-flight reads of the view
    /// being left are cancelled.
    pub fn navigate(&mut self, target: View) -> Vec<Command> {
        let view = nav::resolve(target, self.is_authenticated());
        self.view_token.cancel();
        self.view_token = CancellationToken::new();
        self.active_view = view;
        self.chat = None;
        self.confirm = None;
        self.form = (view == View::Login).then(forms::login);
        tracing::debug!(view = view.title(), "navigate");
        self.enter_commands(view)
    }

    /// Token a spawned command should observe. Writes are never cancelled.
    pub fn cancel_token_for(&self, command: &Command) -> Option<CancellationToken> {
        command.is_fetch().then(|| self.view_token.clone())
    }

    pub fn persisted_state(&self) -> PersistedState {
        let mut state = PersistedState::new(self.active_view);
        for (view, size) in &self.page_sizes {
            state.set_page_size(*view, *size);
        }
        state
    }

    pub fn page_size(&self, view: View) -> u32 {
        self.page_sizes
            .get(&view)
            .copied()
            .unwrap_or(self.config.default_page_size)
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let message = message.into();
        let now = Utc::now();
        let repeated = self.notifications.last().is_some_and(|last| {
            last.message == message && last.age_secs(now) < NOTIFICATION_TTL_SECS
        });
        if !repeated {
            self.notifications.push(Notification::new(level, message));
        }
    }

    pub fn prune_notifications(&mut self) {
        let now = Utc::now();
        self.notifications
            .retain(|notification| notification.age_secs(now) < NOTIFICATION_TTL_SECS);
    }

    pub fn selected_index(&self, view: View) -> usize {
        let len = self.row_count(view);
        let index = self.selected.get(&view).copied().unwrap_or(0);
        index.min(len.saturating_sub(1))
    }

    fn row_count(&self, view: View) -> usize {
        self.store.read(|state| match view {
            View::Agents => state.agents.items.len(),
            View::Tools => state.tools.items.len(),
            View::Models => state.models.items.len(),
            View::Prompts => state.prompts.items.len(),
            View::Triggers => state.agent_triggers.items.len(),
            View::Login | View::Dashboard | View::Profile => 0,
        })
    }

    fn selected_id(&self) -> Option<ResourceId> {
        let index = self.selected_index(self.active_view);
        self.store.read(|state| {
            let id = match self.active_view {
                View::Agents => state.agents.items.get(index).map(Entity::id),
                View::Tools => state.tools.items.get(index).map(Entity::id),
                View::Models => state.models.items.get(index).map(Entity::id),
                View::Prompts => state.prompts.items.get(index).map(Entity::id),
                View::Triggers => state.agent_triggers.items.get(index).map(Entity::id),
                View::Login | View::Dashboard | View::Profile => None,
            };
            id.cloned()
        })
    }

    fn move_selection(&mut self, delta: isize) {
        let view = self.active_view;
        let len = self.row_count(view);
        if len == 0 {
            return;
        }
        let current = self.selected_index(view) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.selected.insert(view, next);
    }

    /// Same page as the last applied fetch, at the view's page size.
    fn list_query(&self, view: View) -> ListQuery {
        let page = self.store.read(|state| match view {
            View::Agents => state.agents.query.page,
            View::Tools => state.tools.query.page,
            View::Models => state.models.query.page,
            View::Prompts => state.prompts.query.page,
            _ => 1,
        });
        ListQuery::new(page.max(1), self.page_size(view))
    }

    fn prompts_command(&self) -> Command {
        match &self.prompt_owner {
            Some(owner) => Command::FetchAgentPrompts(owner.clone()),
            None => Command::FetchPrompts(self.list_query(View::Prompts)),
        }
    }

    pub fn enter_commands(&self, view: View) -> Vec<Command> {
        match view {
            View::Login => Vec::new(),
            View::Dashboard => vec![
                Command::FetchAgents(self.list_query(View::Agents)),
                Command::FetchTools(self.list_query(View::Tools)),
                Command::FetchModels(self.list_query(View::Models)),
                Command::FetchTriggers(self.trigger_filter.clone()),
            ],
            View::Agents => vec![
                Command::FetchAgents(self.list_query(View::Agents)),
                Command::FetchAgentOptions,
            ],
            View::Tools => vec![Command::FetchTools(self.list_query(View::Tools))],
            View::Models => vec![Command::FetchModels(self.list_query(View::Models))],
            View::Prompts => vec![self.prompts_command()],
            View::Triggers => vec![Command::FetchTriggers(self.trigger_filter.clone())],
            View::Profile => vec![Command::FetchProfile],
        }
    }

    /// Reload the list a successful write touched.
    fn refetch(&self, slice: SliceKey) -> Vec<Command> {
        match slice {
            SliceKey::Agents => vec![Command::FetchAgents(self.list_query(View::Agents))],
            SliceKey::Tools => vec![Command::FetchTools(self.list_query(View::Tools))],
            SliceKey::Models => vec![Command::FetchModels(self.list_query(View::Models))],
            SliceKey::Prompts => vec![self.prompts_command()],
            SliceKey::AgentTriggers => vec![Command::FetchTriggers(self.trigger_filter.clone())],
            SliceKey::Auth => Vec::new(),
        }
    }

    // === Input ===

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if self.form.is_some() {
            return self.handle_form_key(key);
        }
        if self.confirm.is_some() {
            return self.handle_confirm_key(key);
        }
        if self.chat.is_some() {
            self.handle_chat_key(key);
            return Vec::new();
        }
        match map_key(key) {
            Some(action) => self.handle_action(action),
            None => Vec::new(),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Vec<Command> {
        let Some(action) = map_form_key(key) else {
            return Vec::new();
        };
        let Some(form) = self.form.as_mut() else {
            return Vec::new();
        };
        match form.handle(action) {
            FormOutcome::Editing => Vec::new(),
            FormOutcome::Cancelled if form.kind == FormKind::Login => {
                self.should_quit = true;
                Vec::new()
            }
            FormOutcome::Cancelled => {
                self.form = None;
                Vec::new()
            }
            FormOutcome::Submitted(Command::FetchTriggers(query)) => {
                self.form = None;
                self.trigger_filter = query.clone();
                self.page_sizes.insert(View::Triggers, query.page_size);
                vec![Command::FetchTriggers(query)]
            }
            FormOutcome::Submitted(command) => vec![command],
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Vec<Command> {
        match key.code {
            KeyCode::Enter | KeyCode::Char('y') => self
                .confirm
                .take()
                .map(|pending| vec![pending.command])
                .unwrap_or_default(),
            KeyCode::Esc | KeyCode::Char('n') => {
                self.confirm = None;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) {
        let Some(chat) = self.chat.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.chat = None,
            KeyCode::Enter => {
                chat.send();
            }
            KeyCode::Backspace => {
                chat.input.pop();
            }
            KeyCode::Char(c) => chat.input.push(c),
            _ => {}
        }
    }

    pub fn handle_action(&mut self, action: Action) -> Vec<Command> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                Vec::new()
            }
            Action::NextView => self.navigate(self.active_view.next()),
            Action::PrevView => self.navigate(self.active_view.previous()),
            Action::SwitchView(index) => match View::from_index(index) {
                Some(view) => self.navigate(view),
                None => Vec::new(),
            },
            Action::MoveUp => {
                self.move_selection(-1);
                Vec::new()
            }
            Action::MoveDown => {
                self.move_selection(1);
                Vec::new()
            }
            Action::PrevPage => self.turn_page(false),
            Action::NextPage => self.turn_page(true),
            Action::Refresh => self.enter_commands(self.active_view),
            Action::NewItem => {
                self.open_create_form();
                Vec::new()
            }
            Action::EditItem => {
                self.open_edit_form();
                Vec::new()
            }
            Action::DeleteItem => {
                self.confirm_delete();
                Vec::new()
            }
            Action::ToggleEnabled => self.toggle_selected(),
            Action::Configure => {
                self.open_configure_form();
                Vec::new()
            }
            Action::OpenChat => {
                self.open_chat();
                Vec::new()
            }
            Action::ShowPrompts => self.show_prompts(),
            Action::Filter => {
                if self.active_view == View::Triggers {
                    self.form = Some(forms::trigger_filter(&self.trigger_filter));
                }
                Vec::new()
            }
            Action::Logout => {
                self.store.logout();
                self.prompt_owner = None;
                self.notify(NotificationLevel::Info, "Signed out");
                self.navigate(View::Login)
            }
            Action::Confirm | Action::Cancel => Vec::new(),
        }
    }

    fn turn_page(&mut self, forward: bool) -> Vec<Command> {
        let view = self.active_view;
        let pagination: Pagination = self.store.read(|state| match view {
            View::Agents => state.agents.pagination,
            View::Tools => state.tools.pagination,
            View::Models => state.models.pagination,
            View::Prompts => state.prompts.pagination,
            View::Triggers => state.agent_triggers.pagination,
            _ => Pagination::default(),
        });
        let can_move = if forward {
            pagination.has_next()
        } else {
            pagination.has_previous()
        };
        if !view.is_paged() || !can_move || (view == View::Prompts && self.prompt_owner.is_some()) {
            return Vec::new();
        }
        let query = if forward {
            ListQuery::next_of(&pagination)
        } else {
            ListQuery::previous_of(&pagination)
        };
        self.selected.insert(view, 0);
        match view {
            View::Agents => vec![Command::FetchAgents(query)],
            View::Tools => vec![Command::FetchTools(query)],
            View::Models => vec![Command::FetchModels(query)],
            View::Prompts => vec![Command::FetchPrompts(query)],
            View::Triggers => {
                self.trigger_filter.page = query.page;
                vec![Command::FetchTriggers(self.trigger_filter.clone())]
            }
            _ => Vec::new(),
        }
    }

    fn open_create_form(&mut self) {
        let form = self.store.read(|state| match self.active_view {
            View::Agents => Some(forms::agent(
                None,
                &state.agents.extra.visibility,
                &state.agents.extra.status,
            )),
            View::Tools => Some(forms::tool(None)),
            View::Models => Some(forms::model(None)),
            View::Prompts => Some(forms::prompt(None, self.prompt_owner.as_ref())),
            _ => None,
        });
        if form.is_some() {
            self.form = form;
        }
    }

    fn open_edit_form(&mut self) {
        if self.active_view == View::Profile {
            let form = self.store.read(|state| forms::profile(state.auth.user.as_ref()));
            self.form = Some(form);
            return;
        }
        let Some(id) = self.selected_id() else {
            return;
        };
        let form = self.store.read(|state| match self.active_view {
            View::Agents => state.agents.get(&id).map(|agent| {
                forms::agent(
                    Some(agent),
                    &state.agents.extra.visibility,
                    &state.agents.extra.status,
                )
            }),
            View::Tools => state.tools.get(&id).map(|tool| forms::tool(Some(tool))),
            View::Models => state.models.get(&id).map(|model| forms::model(Some(model))),
            View::Prompts => state.prompts.get(&id).map(|prompt| forms::prompt(Some(prompt), None)),
            _ => None,
        });
        if form.is_some() {
            self.form = form;
        }
    }

    fn open_configure_form(&mut self) {
        if self.active_view != View::Agents {
            return;
        }
        let Some(id) = self.selected_id() else {
            return;
        };
        let form = self.store.read(|state| {
            state
                .agents
                .get(&id)
                .map(|agent| forms::agent_configuration(agent, &state.models.items, &state.tools.items))
        });
        if form.is_some() {
            self.form = form;
        }
    }

    fn open_chat(&mut self) {
        if self.active_view != View::Agents {
            return;
        }
        let Some(id) = self.selected_id() else {
            return;
        };
        let name = self.store.read(|state| {
            state
                .agents
                .get(&id)
                .map(|agent| agent.display_name().to_string())
        });
        if let Some(name) = name {
            self.chat = Some(ChatPanel::new(name));
        }
    }

    fn show_prompts(&mut self) -> Vec<Command> {
        match self.active_view {
            View::Agents => {
                let Some(id) = self.selected_id() else {
                    return Vec::new();
                };
                self.prompt_owner = Some(id);
                self.navigate(View::Prompts)
            }
            View::Prompts if self.prompt_owner.is_some() => {
                self.prompt_owner = None;
                self.selected.insert(View::Prompts, 0);
                vec![self.prompts_command()]
            }
            _ => Vec::new(),
        }
    }

    fn confirm_delete(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let pending = self.store.read(|state| match self.active_view {
            View::Agents => state.agents.get(&id).map(|agent| PendingDelete {
                label: format!("agent '{}'", agent.display_name()),
                command: Command::DeleteAgent(id.clone()),
            }),
            View::Tools => state.tools.get(&id).map(|tool| PendingDelete {
                label: format!("tool '{}'", tool.name),
                command: Command::DeleteTool(id.clone()),
            }),
            View::Models => state.models.get(&id).map(|model| PendingDelete {
                label: format!("model configuration '{}'", model.model_name),
                command: Command::DeleteModel(id.clone()),
            }),
            View::Prompts => state.prompts.get(&id).map(|prompt| PendingDelete {
                label: format!("prompt '{}'", prompt.name),
                command: Command::DeletePrompt(id.clone()),
            }),
            _ => None,
        });
        self.confirm = pending;
    }

    fn toggle_selected(&mut self) -> Vec<Command> {
        let Some(id) = self.selected_id() else {
            return Vec::new();
        };
        match self.active_view {
            View::Tools => vec![Command::ToggleTool(id)],
            View::Models => {
                let enabled = self
                    .store
                    .read(|state| state.models.get(&id).map(|model| model.is_enabled));
                match enabled {
                    Some(enabled) => vec![Command::UpdateModel(
                        id,
                        ModelConfigPatch {
                            is_enabled: Some(!enabled),
                            ..ModelConfigPatch::default()
                        },
                    )],
                    None => Vec::new(),
                }
            }
            _ => Vec::new(),
        }
    }

    // === Outcomes ===

    pub fn on_client_event(&mut self, event: ClientEvent) -> Vec<Command> {
        match event {
            ClientEvent::Notify(notification) => {
                self.notify(notification.level, notification.message);
                Vec::new()
            }
            ClientEvent::SessionExpired => {
                self.prompt_owner = None;
                self.navigate(View::Login)
            }
        }
    }

    pub fn on_settled(&mut self, settled: Settled) -> Vec<Command> {
        let Settled { command, result } = settled;
        match result {
            Ok(()) => self.on_fulfilled(&command),
            Err(StoreError::Rejected { message }) => {
                if let Some(form) = self.form.as_mut().filter(|form| form.submitting) {
                    form.reject(message);
                } else if !command.is_fetch() {
                    self.notify(NotificationLevel::Error, message);
                }
                Vec::new()
            }
            Err(StoreError::Unauthorized) => {
                if let Some(form) = self.form.as_mut() {
                    form.submitting = false;
                }
                Vec::new()
            }
            Err(StoreError::Cancelled | StoreError::Superseded) => Vec::new(),
        }
    }

    fn on_fulfilled(&mut self, command: &Command) -> Vec<Command> {
        if let Command::Login(_) = command {
            self.notify(NotificationLevel::Success, "Signed in");
            let mut commands = self.navigate(View::Dashboard);
            commands.push(Command::FetchProfile);
            return commands;
        }
        let Some(message) = command.success_message() else {
            return Vec::new();
        };
        if self.form.as_ref().is_some_and(|form| form.submitting) {
            self.form = None;
        }
        self.notify(NotificationLevel::Success, message);
        self.refetch(command.slice())
    }

    /// Counts shown on the dashboard.
    pub fn dashboard_counts(state: &AppState) -> [(&'static str, u64); 4] {
        [
            ("Agents", state.agents.pagination.total),
            ("Tools", state.tools.pagination.total),
            ("Models", state.models.pagination.total),
            ("Invocations", state.agent_triggers.pagination.total),
        ]
    }
}
