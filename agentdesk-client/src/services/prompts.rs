use super::{DeleteResponse, UpdateResponse};
use crate::error::ApiClientError;
use crate::http::HttpClient;
use crate::paths;
use agentdesk_core::{Envelope, ListPage, ListQuery, Prompt, PromptDraft, PromptPatch, ResourceId};

pub struct PromptService<'a> {
    http: &'a HttpClient,
}

impl<'a> PromptService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Envelope<ListPage<Prompt>>, ApiClientError> {
        self.http.get(paths::PROMPTS, &query.to_params()).await
    }

    pub async fn list_for_agent(&self, agent_id: &ResourceId) -> Result<Envelope<ListPage<Prompt>>, ApiClientError> {
        self.http.get(&paths::agent_prompts(agent_id), &[]).await
    }

    pub async fn create(&self, draft: &PromptDraft) -> Result<Envelope<Prompt>, ApiClientError> {
        self.http.post(paths::PROMPTS, draft).await
    }

    pub async fn update(&self, id: &ResourceId, patch: &PromptPatch) -> Result<UpdateResponse, ApiClientError> {
        self.http.put(&paths::item(paths::PROMPTS, id), patch).await
    }

    pub async fn delete(&self, id: &ResourceId) -> Result<DeleteResponse, ApiClientError> {
        self.http.delete(&paths::item(paths::PROMPTS, id)).await
    }
}
