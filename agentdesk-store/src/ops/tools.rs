use crate::error::StoreError;
use crate::state;
use crate::store::Store;
use agentdesk_core::{ListQuery, ResourceId, Tool, ToolDraft, ToolPatch};
use tokio_util::sync::CancellationToken;

impl Store {
    pub async fn fetch_tools(
        &self,
        query: ListQuery,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), StoreError> {
        self.fetch_list(state::tools, query, cancel, self.http().tools().list(&query))
            .await
    }

    pub async fn fetch_tool(
        &self,
        id: &ResourceId,
        cancel: Option<&CancellationToken>,
    ) -> Result<Tool, StoreError> {
        self.fetch_one(state::tools, cancel, self.http().tools().get(id)).await
    }

    pub async fn create_tool(
        &self,
        draft: &ToolDraft,
        cancel: Option<&CancellationToken>,
    ) -> Result<Tool, StoreError> {
        self.create(state::tools, cancel, self.http().tools().create(draft)).await
    }

    pub async fn update_tool(
        &self,
        id: &ResourceId,
        patch: &ToolPatch,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), StoreError> {
        self.update_entity(
            state::tools,
            id.clone(),
            patch.clone(),
            cancel,
            self.http().tools().update(id, patch),
        )
        .await
    }

    /// Flip the enabled flag of a listed tool.
    pub async fn toggle_tool(
        &self,
        id: &ResourceId,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), StoreError> {
        let patch = self.read(|state| state.tools.get(id).map(ToolPatch::toggle));
        match patch {
            Some(patch) => self.update_tool(id, &patch, cancel).await,
            None => Err(StoreError::Rejected {
                message: format!("tool {} is not loaded", id),
            }),
        }
    }

    pub async fn delete_tool(
        &self,
        id: &ResourceId,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), StoreError> {
        self.delete_entity(state::tools, id.clone(), cancel, self.http().tools().delete(id))
            .await
    }
}
