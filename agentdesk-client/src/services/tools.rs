use super::{DeleteResponse, UpdateResponse};
use crate::error::ApiClientError;
use crate::http::HttpClient;
use crate::paths;
use agentdesk_core::{Envelope, ListPage, ListQuery, ResourceId, Tool, ToolDraft, ToolPatch};

pub struct ToolService<'a> {
    http: &'a HttpClient,
}

impl<'a> ToolService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Envelope<ListPage<Tool>>, ApiClientError> {
        self.http.get(paths::TOOLS, &query.to_params()).await
    }

    pub async fn get(&self, id: &ResourceId) -> Result<Envelope<Tool>, ApiClientError> {
        self.http.get(&paths::item(paths::TOOLS, id), &[]).await
    }

    pub async fn create(&self, draft: &ToolDraft) -> Result<Envelope<Tool>, ApiClientError> {
        self.http.post(paths::TOOLS, draft).await
    }

    pub async fn update(&self, id: &ResourceId, patch: &ToolPatch) -> Result<UpdateResponse, ApiClientError> {
        self.http.put(&paths::item(paths::TOOLS, id), patch).await
    }

    pub async fn delete(&self, id: &ResourceId) -> Result<DeleteResponse, ApiClientError> {
        self.http.delete(&paths::item(paths::TOOLS, id)).await
    }
}
