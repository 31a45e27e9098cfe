use crate::error::StoreError;
use crate::state;
use crate::store::Store;
use agentdesk_core::{ListQuery, ModelConfig, ModelConfigDraft, ModelConfigPatch, ResourceId};
use tokio_util::sync::CancellationToken;

impl Store {
    pub async fn fetch_models(
        &self,
        query: ListQuery,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), StoreError> {
        self.fetch_list(state::models, query, cancel, self.http().models().list(&query))
            .await
    }

    pub async fn create_model(
        &self,
        draft: &ModelConfigDraft,
        cancel: Option<&CancellationToken>,
    ) -> Result<ModelConfig, StoreError> {
        self.create(state::models, cancel, self.http().models().create(draft)).await
    }

    pub async fn update_model(
        &self,
        id: &ResourceId,
        patch: &ModelConfigPatch,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), StoreError> {
        self.update_entity(
            state::models,
            id.clone(),
            patch.clone(),
            cancel,
            self.http().models().update(id, patch),
        )
        .await
    }

    pub async fn delete_model(
        &self,
        id: &ResourceId,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), StoreError> {
        self.delete_entity(state::models, id.clone(), cancel, self.http().models().delete(id))
            .await
    }
}
