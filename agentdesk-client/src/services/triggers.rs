use crate::error::ApiClientError;
use crate::http::HttpClient;
use crate::paths;
use agentdesk_core::{Envelope, ListPage, TriggerQuery, TriggerRecord};

pub struct TriggerService<'a> {
    http: &'a HttpClient,
}

impl<'a> TriggerService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &TriggerQuery) -> Result<Envelope<ListPage<TriggerRecord>>, ApiClientError> {
        self.http.get(paths::INVOCATIONS, &query.to_params()).await
    }
}
