//! agentdesk Test Utilities
//!
//! Shared test infrastructure for the agentdesk workspace:
//! - Proptest generators for the domain types
//! - Fixtures for common entities and backend response bodies
//! - Assertions over slice contents

pub use agentdesk_core::{
    Agent, AgentPatch, AgentStatus, Entity, Envelope, InvocationStatus, ListPage, ListQuery,
    ModelConfig, ModelConfigPatch, ModelParams, ModelParamsShape, GenerationParams, Pagination,
    Prompt, PromptPatch, ResourceId, TokenPair, Tool, ToolPatch, ToolType, TriggerRecord, User,
    Visibility,
};

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Map, Value};

// ============================================================================
// GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for agentdesk domain types.

    use super::*;
    use proptest::prelude::*;

    // === Identity ===

    /// Identifiers drawn from a small pool so that collisions (and therefore
    /// hits on existing items) are common.
    pub fn arb_resource_id() -> impl Strategy<Value = ResourceId> {
        (1u8..24).prop_map(|n| ResourceId::new(format!("id-{}", n)))
    }

    /// Numeric identifiers as some endpoints issue them.
    pub fn arb_numeric_id() -> impl Strategy<Value = ResourceId> {
        (1i64..100_000).prop_map(ResourceId::from)
    }

    fn arb_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9 _-]{0,15}"
    }

    // === Enums ===

    pub fn arb_visibility() -> impl Strategy<Value = Visibility> {
        prop_oneof![
            Just(Visibility::Public),
            Just(Visibility::Private),
            Just(Visibility::Organization),
        ]
    }

    pub fn arb_agent_status() -> impl Strategy<Value = AgentStatus> {
        prop_oneof![
            Just(AgentStatus::Draft),
            Just(AgentStatus::Published),
            Just(AgentStatus::Archived),
        ]
    }

    pub fn arb_tool_type() -> impl Strategy<Value = ToolType> {
        prop_oneof![Just(ToolType::Api), Just(ToolType::Function), Just(ToolType::Plugin)]
    }

    pub fn arb_invocation_status() -> impl Strategy<Value = InvocationStatus> {
        prop_oneof![Just(InvocationStatus::Success), Just(InvocationStatus::Failed)]
    }

    // === Entities ===

    pub fn arb_model_params() -> impl Strategy<Value = ModelParams> {
        (0.0f64..=2.0, 1u32..8192).prop_map(|(temperature, max_tokens)| ModelParams {
            temperature,
            max_tokens,
        })
    }

    pub fn arb_agent() -> impl Strategy<Value = Agent> {
        (
            arb_resource_id(),
            arb_name(),
            "[a-z ]{0,40}",
            0.0f64..500.0,
            arb_visibility(),
            arb_agent_status(),
            prop::collection::vec(arb_resource_id(), 0..4),
            prop::option::of(arb_model_params()),
        )
            .prop_map(
                |(id, name, description, pricing, visibility, status, tool_ids, model_params)| Agent {
                    id,
                    name,
                    name_zh: None,
                    name_en: None,
                    description,
                    pricing,
                    visibility,
                    status,
                    agent_type: "assistant".to_string(),
                    tool_ids,
                    model_id: None,
                    prompt_zh: None,
                    prompt_en: None,
                    model_params,
                },
            )
    }

    pub fn arb_agent_patch() -> impl Strategy<Value = AgentPatch> {
        (
            prop::option::of(arb_name()),
            prop::option::of("[a-z ]{0,40}"),
            prop::option::of(0.0f64..500.0),
            prop::option::of(arb_visibility()),
            prop::option::of(arb_agent_status()),
            prop::option::of(prop::collection::vec(arb_resource_id(), 0..4)),
            prop::option::of(arb_model_params()),
        )
            .prop_map(
                |(name, description, pricing, visibility, status, tool_ids, model_params)| AgentPatch {
                    name,
                    description,
                    pricing,
                    visibility,
                    status,
                    tool_ids,
                    model_params,
                    ..AgentPatch::default()
                },
            )
    }

    pub fn arb_tool() -> impl Strategy<Value = Tool> {
        (arb_resource_id(), arb_name(), arb_tool_type(), any::<bool>()).prop_map(
            |(id, name, tool_type, enabled)| Tool {
                id,
                endpoint: format!("https://tools.example.com/{}", name.replace(' ', "-")),
                name,
                tool_type,
                description: String::new(),
                enabled,
                config_params: Map::new(),
                created_at: None,
            },
        )
    }

    pub fn arb_tool_patch() -> impl Strategy<Value = ToolPatch> {
        (
            prop::option::of(arb_name()),
            prop::option::of(arb_tool_type()),
            prop::option::of("https://[a-z]{1,10}\\.example\\.com"),
            prop::option::of(any::<bool>()),
        )
            .prop_map(|(name, tool_type, endpoint, enabled)| ToolPatch {
                name,
                tool_type,
                endpoint,
                enabled,
                ..ToolPatch::default()
            })
    }

    pub fn arb_model_config() -> impl Strategy<Value = ModelConfig> {
        (arb_resource_id(), arb_name(), 0u32..100, -10i32..10, any::<bool>()).prop_map(
            |(id, model_name, weight, priority, is_enabled)| ModelConfig {
                id,
                model_name,
                weight,
                priority,
                base_api_url: "https://llm.example.com/v1".to_string(),
                is_enabled,
                config: ModelParamsShape::Chat(GenerationParams::default()),
            },
        )
    }

    pub fn arb_prompt() -> impl Strategy<Value = Prompt> {
        (arb_resource_id(), arb_name(), "[a-z ]{1,30}", prop::collection::vec("[a-z]{1,6}", 0..3))
            .prop_map(|(id, name, content, tags)| Prompt {
                id,
                agent_id: Some(ResourceId::new("agent-1")),
                name,
                content_zh: content.clone(),
                content_en: content,
                category: None,
                tags,
            })
    }

    /// A list of entities with distinct identifiers, as a server page holds.
    pub fn arb_unique<T, S>(strategy: S, max: usize) -> impl Strategy<Value = Vec<T>>
    where
        T: Entity + std::fmt::Debug,
        S: Strategy<Value = T>,
    {
        prop::collection::vec(strategy, 0..max).prop_map(|items| {
            let mut seen = std::collections::HashSet::new();
            items
                .into_iter()
                .filter(|item| seen.insert(item.id().clone()))
                .collect()
        })
    }

    // === Paging ===

    pub fn arb_list_query() -> impl Strategy<Value = ListQuery> {
        (1u32..20, 1u32..100).prop_map(|(page, page_size)| ListQuery::new(page, page_size))
    }

    pub fn arb_pagination() -> impl Strategy<Value = Pagination> {
        (1u32..20, 1u32..100, 0u64..2000).prop_map(|(page, page_size, total)| {
            Pagination::derived(&ListQuery::new(page, page_size), total)
        })
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built entities and backend response bodies.

    use super::*;

    pub fn agent(id: &str, name: &str) -> Agent {
        Agent {
            id: ResourceId::new(id),
            name: name.to_string(),
            name_zh: None,
            name_en: Some(name.to_string()),
            description: format!("{} agent", name),
            pricing: 0.0,
            visibility: Visibility::Public,
            status: AgentStatus::Published,
            agent_type: "assistant".to_string(),
            tool_ids: Vec::new(),
            model_id: None,
            prompt_zh: None,
            prompt_en: None,
            model_params: Some(ModelParams::default()),
        }
    }

    pub fn tool(id: &str, name: &str) -> Tool {
        Tool {
            id: ResourceId::new(id),
            name: name.to_string(),
            tool_type: ToolType::Api,
            endpoint: format!("https://tools.example.com/{}", name),
            description: String::new(),
            enabled: true,
            config_params: Map::new(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn model_config(id: &str, model_name: &str) -> ModelConfig {
        ModelConfig {
            id: ResourceId::new(id),
            model_name: model_name.to_string(),
            weight: 1,
            priority: 0,
            base_api_url: "https://llm.example.com/v1".to_string(),
            is_enabled: true,
            config: ModelParamsShape::Chat(GenerationParams {
                temperature: Some(0.7),
                max_tokens: Some(2048),
                top_p: None,
            }),
        }
    }

    pub fn prompt(id: &str, agent_id: &str) -> Prompt {
        Prompt {
            id: ResourceId::new(id),
            agent_id: Some(ResourceId::new(agent_id)),
            name: "greeting".to_string(),
            content_zh: "你好".to_string(),
            content_en: "Hello".to_string(),
            category: Some("general".to_string()),
            tags: vec!["default".to_string()],
        }
    }

    pub fn user() -> User {
        User {
            id: ResourceId::new("u1"),
            email: "admin@example.com".to_string(),
            username: Some("admin".to_string()),
            role: Some("admin".to_string()),
        }
    }

    pub fn tokens() -> TokenPair {
        TokenPair {
            access_token: "access-token-1".to_string(),
            refresh_token: "refresh-token-1".to_string(),
        }
    }

    /// Invocation body as `/api/invocations` serves it.
    pub fn invocation_json(id: &str, agent_name: &str, status: InvocationStatus) -> Value {
        json!({
            "id": id,
            "agent_id": "a1",
            "agent": {"name": agent_name},
            "input_text": "hello",
            "metrics": {"output_text": "hi there", "cost_time": 0.42},
            "status": status.as_str(),
            "used_tools": [],
            "created_at": "2024-06-01T12:00:00"
        })
    }

    /// `{success: true, data}` around any serializable payload.
    pub fn ok_body<T: Serialize>(data: &T) -> Value {
        json!({"success": true, "data": data})
    }

    pub fn rejected_body(message: &str) -> Value {
        json!({"success": false, "message": message})
    }

    /// Success envelope around a list page, items under `key`.
    pub fn page_body<T: Serialize>(key: &str, items: &[T], pagination: Pagination) -> Value {
        let mut data = Map::new();
        data.insert(key.to_string(), json!(items));
        data.insert("pagination".to_string(), json!(pagination));
        json!({"success": true, "data": Value::Object(data)})
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Checks over slice contents.

    use super::*;

    /// Assert that no two items share an identifier.
    #[track_caller]
    pub fn assert_unique_ids<T: Entity>(items: &[T]) {
        let mut seen = std::collections::HashSet::new();
        for item in items {
            assert!(seen.insert(item.id().clone()), "duplicate id {}", item.id());
        }
    }

    /// Assert that no item carries `id`.
    #[track_caller]
    pub fn assert_absent<T: Entity>(items: &[T], id: &ResourceId) {
        assert!(
            items.iter().all(|item| item.id() != id),
            "expected {} to be absent",
            id
        );
    }
}
