//! The root state tree.

use crate::slice::{AgentsSlice, AuthSlice, ModelsSlice, PromptsSlice, Slice, ToolsSlice, TriggersSlice};
use agentdesk_client::Session;
use agentdesk_core::User;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub auth: AuthSlice,
    pub agents: AgentsSlice,
    pub tools: ToolsSlice,
    pub models: ModelsSlice,
    pub prompts: PromptsSlice,
    pub agent_triggers: TriggersSlice,
}

/// The auth slice as views see it: token fields come from the session.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSnapshot {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthSnapshot {
    pub(crate) fn capture(auth: &AuthSlice, session: &Session) -> Self {
        let tokens = session.tokens();
        Self {
            is_authenticated: session.is_authenticated(),
            token: tokens.as_ref().map(|tokens| tokens.access_token.clone()),
            refresh_token: tokens.map(|tokens| tokens.refresh_token),
            user: auth.user.clone(),
            loading: auth.loading(),
            error: auth.error().map(str::to_string),
        }
    }
}

// Slice selectors handed to the dispatcher.

pub(crate) fn auth(state: &mut AppState) -> &mut AuthSlice {
    &mut state.auth
}

pub(crate) fn agents(state: &mut AppState) -> &mut AgentsSlice {
    &mut state.agents
}

pub(crate) fn tools(state: &mut AppState) -> &mut ToolsSlice {
    &mut state.tools
}

pub(crate) fn models(state: &mut AppState) -> &mut ModelsSlice {
    &mut state.models
}

pub(crate) fn prompts(state: &mut AppState) -> &mut PromptsSlice {
    &mut state.prompts
}

pub(crate) fn agent_triggers(state: &mut AppState) -> &mut TriggersSlice {
    &mut state.agent_triggers
}
