use super::{DeleteResponse, UpdateResponse};
use crate::error::ApiClientError;
use crate::http::HttpClient;
use crate::paths;
use agentdesk_core::{
    Envelope, ListPage, ListQuery, ModelConfig, ModelConfigDraft, ModelConfigPatch, ResourceId,
};

pub struct ModelService<'a> {
    http: &'a HttpClient,
}

impl<'a> ModelService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Envelope<ListPage<ModelConfig>>, ApiClientError> {
        self.http.get(paths::MODEL_CONFIGS, &query.to_params()).await
    }

    pub async fn create(&self, draft: &ModelConfigDraft) -> Result<Envelope<ModelConfig>, ApiClientError> {
        self.http.post(paths::MODEL_CONFIGS, draft).await
    }

    pub async fn update(
        &self,
        id: &ResourceId,
        patch: &ModelConfigPatch,
    ) -> Result<UpdateResponse, ApiClientError> {
        self.http.put(&paths::item(paths::MODEL_CONFIGS, id), patch).await
    }

    pub async fn delete(&self, id: &ResourceId) -> Result<DeleteResponse, ApiClientError> {
        self.http.delete(&paths::item(paths::MODEL_CONFIGS, id)).await
    }
}
