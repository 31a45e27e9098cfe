//! agentdesk Client - HTTP Adapter and Resource Services
//!
//! Every outbound request to the backend goes through [`HttpClient`]. It
//! attaches the session's bearer token, unwraps response bodies and turns
//! failures into [`ApiClientError`] plus a [`ClientEvent`] for the front end.
//! The per-resource services in [`services`] are thin mappings from one
//! domain operation to one HTTP call.

pub mod error;
pub mod http;
pub mod notifications;
pub mod paths;
pub mod services;
pub mod session;

pub use error::{ApiClientError, StorageError};
pub use http::{HttpClient, HttpConfig};
pub use notifications::{ClientEvent, Notification, NotificationLevel};
pub use services::{
    AgentService, DeleteResponse, ModelService, PromptService, ToolService, TriggerService,
    UpdateResponse, UserService,
};
pub use session::{FileTokenStorage, MemoryTokenStorage, Session, TokenStorage};
