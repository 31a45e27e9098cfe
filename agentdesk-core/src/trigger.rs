//! Agent invocation (trigger) audit records.
//!
//! Read-only: the console lists and filters these but never creates or
//! mutates one.

use crate::entity::Entity;
use crate::enums::InvocationStatus;
use crate::identity::{lenient_timestamp, ResourceId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::convert::Infallible;

const UNKNOWN_AGENT: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "InvocationWire")]
pub struct TriggerRecord {
    pub id: ResourceId,
    pub agent_id: Option<ResourceId>,
    pub agent_name: String,
    pub query: String,
    pub response: String,
    pub status: InvocationStatus,
    /// Elapsed time reported by the backend, in seconds.
    pub cost_time: f64,
    pub used_tools: Vec<String>,
    pub tool_results: Option<Value>,
    #[serde(with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
}

impl Entity for TriggerRecord {
    type Patch = Infallible;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn apply_patch(&mut self, patch: &Infallible) {
        match *patch {}
    }
}

/// Invocation shape as served by `/api/invocations`.
#[derive(Debug, Deserialize)]
struct InvocationWire {
    id: ResourceId,
    #[serde(default)]
    agent_id: Option<ResourceId>,
    #[serde(default)]
    agent: Option<AgentRef>,
    #[serde(default, alias = "query")]
    input_text: String,
    #[serde(default)]
    metrics: Option<InvocationMetrics>,
    status: InvocationStatus,
    #[serde(default)]
    used_tools: Option<Vec<String>>,
    #[serde(default)]
    tool_results: Option<Value>,
    #[serde(default, with = "lenient_timestamp")]
    created_at: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
struct AgentRef {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct InvocationMetrics {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    cost_time: Option<f64>,
}

impl From<InvocationWire> for TriggerRecord {
    fn from(wire: InvocationWire) -> Self {
        let metrics = wire.metrics.unwrap_or_default();
        Self {
            id: wire.id,
            agent_id: wire.agent_id,
            agent_name: wire
                .agent
                .and_then(|agent| agent.name)
                .unwrap_or_else(|| UNKNOWN_AGENT.to_string()),
            query: wire.input_text,
            response: metrics.output_text.unwrap_or_default(),
            status: wire.status,
            cost_time: metrics.cost_time.unwrap_or(0.0),
            used_tools: wire.used_tools.unwrap_or_default(),
            tool_results: wire.tool_results,
            created_at: wire.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_is_flattened() {
        let record: TriggerRecord = serde_json::from_value(serde_json::json!({
            "id": 11,
            "agent_id": 2,
            "agent": {"name": "Helper"},
            "input_text": "what time is it",
            "metrics": {"output_text": "noon", "cost_time": 1.25},
            "status": "success",
            "used_tools": ["clock"],
            "tool_results": {"clock": "12:00"},
            "created_at": "2024-06-01T12:00:00Z"
        }))
        .unwrap();
        assert_eq!(record.agent_name, "Helper");
        assert_eq!(record.query, "what time is it");
        assert_eq!(record.response, "noon");
        assert_eq!(record.cost_time, 1.25);
        assert_eq!(record.used_tools, vec!["clock"]);
    }

    #[test]
    fn sparse_invocation_gets_placeholders() {
        let record: TriggerRecord =
            serde_json::from_str(r#"{"id": "x", "status": "failed"}"#).unwrap();
        assert_eq!(record.agent_name, UNKNOWN_AGENT);
        assert_eq!(record.response, "");
        assert_eq!(record.cost_time, 0.0);
        assert!(record.tool_results.is_none());
    }
}
