use crate::error::StoreError;
use crate::lifecycle::OpKind;
use crate::slice::AgentOptions;
use crate::state;
use crate::store::Store;
use agentdesk_client::ApiClientError;
use agentdesk_core::{Agent, AgentConfiguration, AgentDraft, AgentPatch, ListQuery, ResourceId};
use tokio_util::sync::CancellationToken;

const OPTIONS_FALLBACK: &str = "failed to load agent options";

impl Store {
    pub async fn fetch_agents(
        &self,
        query: ListQuery,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), StoreError> {
        self.fetch_list(state::agents, query, cancel, self.http().agents().list(&query))
            .await
    }

    pub async fn fetch_agent(
        &self,
        id: &ResourceId,
        cancel: Option<&CancellationToken>,
    ) -> Result<Agent, StoreError> {
        self.fetch_one(state::agents, cancel, self.http().agents().get(id)).await
    }

    pub async fn create_agent(
        &self,
        draft: &AgentDraft,
        cancel: Option<&CancellationToken>,
    ) -> Result<Agent, StoreError> {
        self.create(state::agents, cancel, self.http().agents().create(draft)).await
    }

    pub async fn update_agent(
        &self,
        id: &ResourceId,
        patch: &AgentPatch,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), StoreError> {
        self.update_entity(
            state::agents,
            id.clone(),
            patch.clone(),
            cancel,
            self.http().agents().update(id, patch),
        )
        .await
    }

    /// Save prompts, tool bindings and model choice. The backend has no
    /// dedicated endpoint; this is an agent update.
    pub async fn configure_agent(
        &self,
        id: &ResourceId,
        configuration: AgentConfiguration,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), StoreError> {
        let patch = AgentPatch::from(configuration);
        self.update_agent(id, &patch, cancel).await
    }

    pub async fn delete_agent(
        &self,
        id: &ResourceId,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), StoreError> {
        self.delete_entity(state::agents, id.clone(), cancel, self.http().agents().delete(id))
            .await
    }

    /// Visibility and status choices for the agent form.
    pub async fn fetch_agent_options(&self, cancel: Option<&CancellationToken>) -> Result<(), StoreError> {
        let service = self.http().agents();
        let call = async {
            let (visibility, status) =
                tokio::try_join!(service.visibility_options(), service.status_options())?;
            Ok::<_, ApiClientError>(AgentOptions {
                visibility: visibility.require_data(OPTIONS_FALLBACK)?,
                status: status.require_data(OPTIONS_FALLBACK)?,
            })
        };
        self.dispatch(
            state::agents,
            OpKind::FetchOptions,
            cancel,
            OPTIONS_FALLBACK,
            call,
            |slice, options| slice.extra = options,
        )
        .await
    }
}
