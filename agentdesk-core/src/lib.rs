//! agentdesk Core - Domain Types
//!
//! Client-side projections of the backend resources managed by the console.
//! The server is authoritative for every value here; this crate only
//! describes shapes, merge rules and local validation.

pub mod agent;
pub mod auth;
pub mod entity;
pub mod enums;
pub mod error;
pub mod identity;
pub mod model;
pub mod page;
pub mod prompt;
pub mod tool;
pub mod trigger;
pub mod validation;

pub use agent::{Agent, AgentConfiguration, AgentDraft, AgentPatch, ModelParams, SelectOption};
pub use auth::{LoginRequest, LoginResponse, TokenPair, User, UserPatch};
pub use entity::Entity;
pub use enums::{AgentStatus, EnumParseError, InvocationStatus, ModelKind, ToolType, Visibility};
pub use error::{EnvelopeError, ValidationError};
pub use identity::{ResourceId, Timestamp};
pub use model::{
    EmbeddingParams, GenerationParams, ImageParams, ModelConfig, ModelConfigDraft, ModelConfigPatch,
    ModelParamsShape,
};
pub use page::{Envelope, ListPage, ListQuery, Pagination, TriggerQuery};
pub use prompt::{Prompt, PromptDraft, PromptPatch};
pub use tool::{Tool, ToolDraft, ToolPatch};
pub use trigger::TriggerRecord;
