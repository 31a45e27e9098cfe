//! Response envelope, list pages and list queries.

use crate::enums::InvocationStatus;
use crate::error::EnvelopeError;
use crate::identity::ResourceId;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Outer wrapper every backend response carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, alias = "detail", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// `success: false` becomes a business error carrying the server message,
    /// or `fallback` when the server sent none.
    pub fn into_result(self, fallback: &str) -> Result<Option<T>, EnvelopeError> {
        if !self.success {
            return Err(EnvelopeError::Rejected {
                message: self
                    .message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| fallback.to_string()),
            });
        }
        Ok(self.data)
    }

    /// Like [`Envelope::into_result`] but a missing payload is also an error.
    pub fn require_data(self, fallback: &str) -> Result<T, EnvelopeError> {
        self.into_result(fallback)?
            .ok_or_else(|| EnvelopeError::MissingData {
                fallback: fallback.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_page")]
    pub total_pages: u32,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
            total_pages: 1,
        }
    }
}

impl Pagination {
    /// Derive pagination for a page the server did not describe.
    pub fn derived(query: &ListQuery, total: u64) -> Self {
        let page_size = query.page_size.max(1);
        let pages = total.div_ceil(u64::from(page_size)).max(1);
        Self {
            page: query.page.max(1),
            page_size,
            total,
            total_pages: u32::try_from(pages).unwrap_or(u32::MAX),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Query for the page after `current`, clamped to the last page.
    pub fn next_of(current: &Pagination) -> Self {
        Self::new(
            (current.page + 1).min(current.total_pages.max(1)),
            current.page_size,
        )
    }

    pub fn previous_of(current: &Pagination) -> Self {
        Self::new(current.page.saturating_sub(1), current.page_size)
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
        ]
    }
}

/// Filters for the invocation history. Times are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerQuery {
    pub agent_id: Option<ResourceId>,
    pub status: Option<InvocationStatus>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub page: u32,
    pub page_size: u32,
}

impl Default for TriggerQuery {
    fn default() -> Self {
        Self {
            agent_id: None,
            status: None,
            start_time: None,
            end_time: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TriggerQuery {
    pub fn list_query(&self) -> ListQuery {
        ListQuery::new(self.page, self.page_size)
    }

    /// The time range is only sent when both bounds are present.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(agent_id) = &self.agent_id {
            params.push(("agent_id", agent_id.to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            params.push(("start_time", start.to_string()));
            params.push(("end_time", end.to_string()));
        }
        params.extend(self.list_query().to_params());
        params
    }
}

/// One page of a list endpoint.
///
/// Items arrive under `items` or a resource-specific key; some endpoints
/// return a bare array instead of an object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
    pub total: Option<u64>,
}

impl<T> ListPage<T> {
    pub fn new(items: Vec<T>, pagination: Option<Pagination>) -> Self {
        Self {
            items,
            pagination,
            total: None,
        }
    }

    /// Server pagination when present, otherwise derived from `query` and
    /// the reported (or observed) total.
    pub fn resolve_pagination(&self, query: &ListQuery) -> Pagination {
        match self.pagination {
            Some(pagination) => pagination,
            None => {
                let total = self.total.unwrap_or(self.items.len() as u64);
                Pagination::derived(query, total)
            }
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ListPage<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged, bound(deserialize = "U: Deserialize<'de>"))]
        enum Wire<U> {
            Bare(Vec<U>),
            Paged {
                #[serde(
                    default,
                    alias = "agents",
                    alias = "tools",
                    alias = "models",
                    alias = "prompts",
                    alias = "invocations"
                )]
                items: Vec<U>,
                #[serde(default)]
                pagination: Option<Pagination>,
                #[serde(default)]
                total: Option<u64>,
            },
        }

        Ok(match Wire::<T>::deserialize(deserializer)? {
            Wire::Bare(items) => ListPage {
                items,
                pagination: None,
                total: None,
            },
            Wire::Paged {
                items,
                pagination,
                total,
            } => ListPage {
                items,
                pagination,
                total,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failed_envelope_prefers_server_message() {
        let env: Envelope<u32> =
            serde_json::from_value(json!({"success": false, "message": "name taken"})).unwrap();
        assert_eq!(env.into_result("failed to create").unwrap_err().message(), "name taken");

        let env: Envelope<u32> = serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(
            env.into_result("failed to create").unwrap_err().message(),
            "failed to create"
        );
    }

    #[test]
    fn detail_is_read_as_message() {
        let env: Envelope<u32> =
            serde_json::from_value(json!({"success": false, "detail": "not found"})).unwrap();
        assert_eq!(env.message.as_deref(), Some("not found"));
    }

    #[test]
    fn resource_keys_are_item_aliases() {
        let page: ListPage<u32> = serde_json::from_value(json!({
            "agents": [1, 2, 3],
            "pagination": {"page": 1, "page_size": 10, "total": 3, "total_pages": 1}
        }))
        .unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.pagination.unwrap().total, 3);

        let bare: ListPage<u32> = serde_json::from_value(json!([4, 5])).unwrap();
        assert_eq!(bare.items, vec![4, 5]);
    }

    #[test]
    fn item_type_needs_no_default() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Named {
            name: String,
        }

        let page: ListPage<Named> =
            serde_json::from_value(json!({"tools": [{"name": "search"}], "total": 1})).unwrap();
        assert_eq!(
            page.items,
            vec![Named {
                name: "search".to_string()
            }]
        );

        let empty: ListPage<Named> = serde_json::from_value(json!({"total": 0})).unwrap();
        assert!(empty.items.is_empty());
    }

    #[test]
    fn missing_pagination_is_derived() {
        let page: ListPage<u32> =
            serde_json::from_value(json!({"invocations": [1, 2], "total": 25})).unwrap();
        let pagination = page.resolve_pagination(&ListQuery::new(2, 10));
        assert_eq!(pagination.page, 2);
        assert_eq!(pagination.total, 25);
        assert_eq!(pagination.total_pages, 3);

        let empty: ListPage<u32> = serde_json::from_value(json!({"items": []})).unwrap();
        assert_eq!(empty.resolve_pagination(&ListQuery::default()).total_pages, 1);
    }

    #[test]
    fn time_range_needs_both_bounds() {
        let query = TriggerQuery {
            start_time: Some(1_700_000_000_000),
            ..TriggerQuery::default()
        };
        let keys: Vec<_> = query.to_params().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["page", "page_size"]);

        let query = TriggerQuery {
            agent_id: Some("a1".into()),
            status: Some(InvocationStatus::Failed),
            start_time: Some(1),
            end_time: Some(2),
            ..TriggerQuery::default()
        };
        let params = query.to_params();
        assert!(params.contains(&("status", "failed".to_string())));
        assert!(params.contains(&("end_time", "2".to_string())));
    }

    #[test]
    fn paging_is_clamped() {
        let last = Pagination {
            page: 3,
            page_size: 10,
            total: 30,
            total_pages: 3,
        };
        assert_eq!(ListQuery::next_of(&last).page, 3);
        assert_eq!(ListQuery::previous_of(&Pagination::default()).page, 1);
    }
}
