//! Backend path templates.

use agentdesk_core::ResourceId;

pub const ADMIN_LOGIN: &str = "/api/users/admin/login";
pub const PROFILE: &str = "/api/users/profile";

pub const AGENTS: &str = "/api/agents";
pub const AGENT_CREATE: &str = "/api/agents/create";
pub const AGENT_VISIBILITY_OPTIONS: &str = "/api/agents/visibility/options";
pub const AGENT_STATUS_OPTIONS: &str = "/api/agents/status/options";

pub const TOOLS: &str = "/api/tools";
pub const MODEL_CONFIGS: &str = "/api/model-configs";
pub const PROMPTS: &str = "/api/prompts";
pub const INVOCATIONS: &str = "/api/invocations";

/// `<collection>/:id`
pub fn item(collection: &str, id: &ResourceId) -> String {
    format!("{}/{}", collection, id)
}

/// `/api/agents/:id/prompts`
pub fn agent_prompts(agent_id: &ResourceId) -> String {
    format!("{}/{}/prompts", AGENTS, agent_id)
}
