use crate::error::StoreError;
use crate::state;
use crate::store::Store;
use agentdesk_core::TriggerQuery;
use tokio_util::sync::CancellationToken;

impl Store {
    /// Invocation history for the given filter. An empty result is a valid
    /// page, not a failure.
    pub async fn fetch_agent_triggers(
        &self,
        query: TriggerQuery,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), StoreError> {
        let filter = query.clone();
        self.fetch_list_with(
            state::agent_triggers,
            query.list_query(),
            cancel,
            self.http().triggers().list(&query),
            move |applied| *applied = filter,
        )
        .await
    }
}
