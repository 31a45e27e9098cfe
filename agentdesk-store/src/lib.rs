//! agentdesk Store - Client State and Operation Lifecycle
//!
//! One [`Store`] holds every slice of client state. Each async operation
//! goes through the same lifecycle: dispatch marks the slice pending, the
//! service call runs without any lock held, and settlement applies a short
//! synchronous reducer. Late responses from superseded list fetches and
//! results of cancelled operations only settle `loading`.

pub mod error;
pub mod lifecycle;
mod ops;
pub mod slice;
pub mod state;
pub mod store;

pub use error::StoreError;
pub use lifecycle::{Lifecycle, OpKind, Ticket};
pub use ops::LOGIN_FAILED;
pub use slice::{
    AgentOptions, AgentsSlice, AuthSlice, Listed, ModelsSlice, PromptScope, PromptsSlice,
    ResourceSlice, Slice, SliceKey, ToolsSlice, TriggersSlice,
};
pub use state::{AppState, AuthSnapshot};
pub use store::{Store, StoreChange};

pub use tokio_util::sync::CancellationToken;
