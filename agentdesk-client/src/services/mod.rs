//! Resource services: one domain operation, one HTTP call.
//!
//! Services return the decoded response body untouched. Envelope handling,
//! fallbacks and state transitions belong to the store.

mod agents;
mod models;
mod prompts;
mod tools;
mod triggers;
mod users;

pub use agents::AgentService;
pub use models::ModelService;
pub use prompts::PromptService;
pub use tools::ToolService;
pub use triggers::TriggerService;
pub use users::UserService;

use agentdesk_core::Envelope;
use serde_json::Value;

/// Body of a delete call. `None` when the server answered with no content.
pub type DeleteResponse = Option<Envelope<Value>>;

/// Body of an update call. Only the envelope status is read; whatever the
/// server echoes under `data` is left undecoded.
pub type UpdateResponse = Option<Envelope<Value>>;
