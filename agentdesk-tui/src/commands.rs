//! Store operations requested by the UI.
//!
//! [`App`](crate::app::App) only produces commands; the event loop spawns
//! [`run`] for each one and feeds the [`Settled`] result back.

use agentdesk_core::{
    AgentConfiguration, AgentDraft, AgentPatch, ListQuery, LoginRequest, ModelConfigDraft,
    ModelConfigPatch, PromptDraft, PromptPatch, ResourceId, ToolDraft, ToolPatch, TriggerQuery,
    UserPatch,
};
use agentdesk_store::{CancellationToken, SliceKey, Store, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login(LoginRequest),
    FetchProfile,
    UpdateProfile(UserPatch),

    FetchAgents(ListQuery),
    FetchAgentOptions,
    CreateAgent(AgentDraft),
    UpdateAgent(ResourceId, AgentPatch),
    ConfigureAgent(ResourceId, AgentConfiguration),
    DeleteAgent(ResourceId),

    FetchTools(ListQuery),
    CreateTool(ToolDraft),
    UpdateTool(ResourceId, ToolPatch),
    ToggleTool(ResourceId),
    DeleteTool(ResourceId),

    FetchModels(ListQuery),
    CreateModel(ModelConfigDraft),
    UpdateModel(ResourceId, ModelConfigPatch),
    DeleteModel(ResourceId),

    FetchPrompts(ListQuery),
    FetchAgentPrompts(ResourceId),
    CreatePrompt(PromptDraft),
    UpdatePrompt(ResourceId, PromptPatch),
    DeletePrompt(ResourceId),

    FetchTriggers(TriggerQuery),
}

impl Command {
    /// Reads are tied to the view that issued them and are cancelled when
    /// it is left; writes always run to completion.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            Command::FetchProfile
                | Command::FetchAgents(_)
                | Command::FetchAgentOptions
                | Command::FetchTools(_)
                | Command::FetchModels(_)
                | Command::FetchPrompts(_)
                | Command::FetchAgentPrompts(_)
                | Command::FetchTriggers(_)
        )
    }

    pub fn slice(&self) -> SliceKey {
        match self {
            Command::Login(_) | Command::FetchProfile | Command::UpdateProfile(_) => SliceKey::Auth,
            Command::FetchAgents(_)
            | Command::FetchAgentOptions
            | Command::CreateAgent(_)
            | Command::UpdateAgent(..)
            | Command::ConfigureAgent(..)
            | Command::DeleteAgent(_) => SliceKey::Agents,
            Command::FetchTools(_)
            | Command::CreateTool(_)
            | Command::UpdateTool(..)
            | Command::ToggleTool(_)
            | Command::DeleteTool(_) => SliceKey::Tools,
            Command::FetchModels(_)
            | Command::CreateModel(_)
            | Command::UpdateModel(..)
            | Command::DeleteModel(_) => SliceKey::Models,
            Command::FetchPrompts(_)
            | Command::FetchAgentPrompts(_)
            | Command::CreatePrompt(_)
            | Command::UpdatePrompt(..)
            | Command::DeletePrompt(_) => SliceKey::Prompts,
            Command::FetchTriggers(_) => SliceKey::AgentTriggers,
        }
    }

    /// Toast shown when a write succeeds.
    pub fn success_message(&self) -> Option<&'static str> {
        match self {
            Command::UpdateProfile(_) => Some("Profile updated"),
            Command::CreateAgent(_) => Some("Agent created"),
            Command::UpdateAgent(..) => Some("Agent updated"),
            Command::ConfigureAgent(..) => Some("Agent configuration saved"),
            Command::DeleteAgent(_) => Some("Agent deleted"),
            Command::CreateTool(_) => Some("Tool created"),
            Command::UpdateTool(..) => Some("Tool updated"),
            Command::ToggleTool(_) => Some("Tool status changed"),
            Command::DeleteTool(_) => Some("Tool deleted"),
            Command::CreateModel(_) => Some("Model configuration created"),
            Command::UpdateModel(..) => Some("Model configuration updated"),
            Command::DeleteModel(_) => Some("Model configuration deleted"),
            Command::CreatePrompt(_) => Some("Prompt created"),
            Command::UpdatePrompt(..) => Some("Prompt updated"),
            Command::DeletePrompt(_) => Some("Prompt deleted"),
            _ => None,
        }
    }
}

/// Outcome of one spawned command.
#[derive(Debug, Clone)]
pub struct Settled {
    pub command: Command,
    pub result: Result<(), StoreError>,
}

pub async fn run(
    store: &Store,
    command: &Command,
    cancel: Option<&CancellationToken>,
) -> Result<(), StoreError> {
    match command {
        Command::Login(credentials) => store.login(credentials).await,
        Command::FetchProfile => store.fetch_profile(cancel).await.map(drop),
        Command::UpdateProfile(patch) => store.update_profile(patch, cancel).await,

        Command::FetchAgents(query) => store.fetch_agents(*query, cancel).await,
        Command::FetchAgentOptions => store.fetch_agent_options(cancel).await,
        Command::CreateAgent(draft) => store.create_agent(draft, cancel).await.map(drop),
        Command::UpdateAgent(id, patch) => store.update_agent(id, patch, cancel).await,
        Command::ConfigureAgent(id, configuration) => {
            store.configure_agent(id, configuration.clone(), cancel).await
        }
        Command::DeleteAgent(id) => store.delete_agent(id, cancel).await,

        Command::FetchTools(query) => store.fetch_tools(*query, cancel).await,
        Command::CreateTool(draft) => store.create_tool(draft, cancel).await.map(drop),
        Command::UpdateTool(id, patch) => store.update_tool(id, patch, cancel).await,
        Command::ToggleTool(id) => store.toggle_tool(id, cancel).await,
        Command::DeleteTool(id) => store.delete_tool(id, cancel).await,

        Command::FetchModels(query) => store.fetch_models(*query, cancel).await,
        Command::CreateModel(draft) => store.create_model(draft, cancel).await.map(drop),
        Command::UpdateModel(id, patch) => store.update_model(id, patch, cancel).await,
        Command::DeleteModel(id) => store.delete_model(id, cancel).await,

        Command::FetchPrompts(query) => store.fetch_prompts(*query, cancel).await,
        Command::FetchAgentPrompts(agent_id) => store.fetch_agent_prompts(agent_id, cancel).await,
        Command::CreatePrompt(draft) => store.create_prompt(draft, cancel).await.map(drop),
        Command::UpdatePrompt(id, patch) => store.update_prompt(id, patch, cancel).await,
        Command::DeletePrompt(id) => store.delete_prompt(id, cancel).await,

        Command::FetchTriggers(query) => store.fetch_agent_triggers(query.clone(), cancel).await,
    }
}
