use super::{DeleteResponse, UpdateResponse};
use crate::error::ApiClientError;
use crate::http::HttpClient;
use crate::paths;
use agentdesk_core::{Agent, AgentDraft, AgentPatch, Envelope, ListPage, ListQuery, ResourceId, SelectOption};

pub struct AgentService<'a> {
    http: &'a HttpClient,
}

impl<'a> AgentService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Envelope<ListPage<Agent>>, ApiClientError> {
        self.http.get(paths::AGENTS, &query.to_params()).await
    }

    pub async fn get(&self, id: &ResourceId) -> Result<Envelope<Agent>, ApiClientError> {
        self.http.get(&paths::item(paths::AGENTS, id), &[]).await
    }

    pub async fn create(&self, draft: &AgentDraft) -> Result<Envelope<Agent>, ApiClientError> {
        self.http.post(paths::AGENT_CREATE, draft).await
    }

    /// Also used to save an agent's prompt/tool/model configuration.
    pub async fn update(&self, id: &ResourceId, patch: &AgentPatch) -> Result<UpdateResponse, ApiClientError> {
        self.http.put(&paths::item(paths::AGENTS, id), patch).await
    }

    pub async fn delete(&self, id: &ResourceId) -> Result<DeleteResponse, ApiClientError> {
        self.http.delete(&paths::item(paths::AGENTS, id)).await
    }

    pub async fn visibility_options(&self) -> Result<Envelope<Vec<SelectOption>>, ApiClientError> {
        self.http.get(paths::AGENT_VISIBILITY_OPTIONS, &[]).await
    }

    pub async fn status_options(&self) -> Result<Envelope<Vec<SelectOption>>, ApiClientError> {
        self.http.get(paths::AGENT_STATUS_OPTIONS, &[]).await
    }
}
