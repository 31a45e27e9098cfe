use crate::error::StoreError;
use crate::state;
use crate::store::Store;
use agentdesk_core::{ListQuery, Prompt, PromptDraft, PromptPatch, ResourceId};
use tokio_util::sync::CancellationToken;

impl Store {
    /// Every prompt, regardless of owner.
    pub async fn fetch_prompts(
        &self,
        query: ListQuery,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), StoreError> {
        self.fetch_list_with(
            state::prompts,
            query,
            cancel,
            self.http().prompts().list(&query),
            |scope| scope.agent_id = None,
        )
        .await
    }

    pub async fn fetch_agent_prompts(
        &self,
        agent_id: &ResourceId,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), StoreError> {
        let owner = agent_id.clone();
        self.fetch_list_with(
            state::prompts,
            ListQuery::default(),
            cancel,
            self.http().prompts().list_for_agent(agent_id),
            move |scope| scope.agent_id = Some(owner),
        )
        .await
    }

    pub async fn create_prompt(
        &self,
        draft: &PromptDraft,
        cancel: Option<&CancellationToken>,
    ) -> Result<Prompt, StoreError> {
        self.create(state::prompts, cancel, self.http().prompts().create(draft)).await
    }

    pub async fn update_prompt(
        &self,
        id: &ResourceId,
        patch: &PromptPatch,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), StoreError> {
        self.update_entity(
            state::prompts,
            id.clone(),
            patch.clone(),
            cancel,
            self.http().prompts().update(id, patch),
        )
        .await
    }

    pub async fn delete_prompt(
        &self,
        id: &ResourceId,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), StoreError> {
        self.delete_entity(state::prompts, id.clone(), cancel, self.http().prompts().delete(id))
            .await
    }
}
