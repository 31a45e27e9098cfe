//! Slice shapes and their reducers.

use crate::lifecycle::Lifecycle;
use agentdesk_core::{
    Agent, Entity, ListQuery, ModelConfig, Pagination, Prompt, ResourceId, SelectOption, Tool,
    TriggerQuery, TriggerRecord, User,
};

/// Names a slice in change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceKey {
    Auth,
    Agents,
    Tools,
    Models,
    Prompts,
    AgentTriggers,
}

impl SliceKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SliceKey::Auth => "auth",
            SliceKey::Agents => "agents",
            SliceKey::Tools => "tools",
            SliceKey::Models => "models",
            SliceKey::Prompts => "prompts",
            SliceKey::AgentTriggers => "agent_triggers",
        }
    }
}

/// Anything with a lifecycle that the store can dispatch against.
pub trait Slice {
    const KEY: SliceKey;

    fn lifecycle(&self) -> &Lifecycle;
    fn lifecycle_mut(&mut self) -> &mut Lifecycle;

    fn loading(&self) -> bool {
        self.lifecycle().loading()
    }

    fn error(&self) -> Option<&str> {
        self.lifecycle().error()
    }
}

/// An entity that lives in its own list slice.
pub trait Listed: Entity {
    const SLICE: SliceKey;
    /// Used in fallback messages, e.g. "failed to load agents".
    const SINGULAR: &'static str;
    const PLURAL: &'static str;
}

impl Listed for Agent {
    const SLICE: SliceKey = SliceKey::Agents;
    const SINGULAR: &'static str = "agent";
    const PLURAL: &'static str = "agents";
}

impl Listed for Tool {
    const SLICE: SliceKey = SliceKey::Tools;
    const SINGULAR: &'static str = "tool";
    const PLURAL: &'static str = "tools";
}

impl Listed for ModelConfig {
    const SLICE: SliceKey = SliceKey::Models;
    const SINGULAR: &'static str = "model configuration";
    const PLURAL: &'static str = "model configurations";
}

impl Listed for Prompt {
    const SLICE: SliceKey = SliceKey::Prompts;
    const SINGULAR: &'static str = "prompt";
    const PLURAL: &'static str = "prompts";
}

impl Listed for TriggerRecord {
    const SLICE: SliceKey = SliceKey::AgentTriggers;
    const SINGULAR: &'static str = "trigger record";
    const PLURAL: &'static str = "trigger records";
}

/// `{items, pagination, loading, error}` plus slice-specific `extra` state.
#[derive(Debug, Clone)]
pub struct ResourceSlice<T, X = ()> {
    pub items: Vec<T>,
    pub pagination: Pagination,
    /// Query of the last applied list fetch, reused to refetch after a
    /// mutation.
    pub query: ListQuery,
    pub extra: X,
    lifecycle: Lifecycle,
}

impl<T, X: Default> Default for ResourceSlice<T, X> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
            query: ListQuery::default(),
            extra: X::default(),
            lifecycle: Lifecycle::new(),
        }
    }
}

impl<T: Listed, X> Slice for ResourceSlice<T, X> {
    const KEY: SliceKey = T::SLICE;

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }
}

impl<T: Entity, X> ResourceSlice<T, X> {
    pub fn get(&self, id: &ResourceId) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn position(&self, id: &ResourceId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// Fetch-list fulfilled: items and pagination are replaced together.
    pub fn replace(&mut self, items: Vec<T>, pagination: Pagination, query: ListQuery) {
        self.items = items;
        self.pagination = pagination;
        self.query = query;
    }

    /// Create fulfilled: the server's entity joins the end of the list.
    /// An entity with the same id already present is replaced in place.
    pub fn append(&mut self, item: T) {
        match self.position(item.id()) {
            Some(index) => self.items[index] = item,
            None => self.items.push(item),
        }
    }

    /// Fetch-one fulfilled.
    pub fn upsert(&mut self, item: T) {
        self.append(item);
    }

    /// Update fulfilled: shallow-merge `patch` into the matching entity.
    /// Returns false when no entity carries `id`.
    pub fn apply_patch(&mut self, id: &ResourceId, patch: &T::Patch) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                item.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    /// Delete fulfilled. Idempotent.
    pub fn remove(&mut self, id: &ResourceId) {
        self.items.retain(|item| item.id() != id);
    }
}

/// Option lists served by the backend for the agent form.
#[derive(Debug, Clone, Default)]
pub struct AgentOptions {
    pub visibility: Vec<SelectOption>,
    pub status: Vec<SelectOption>,
}

/// Owner of the listed prompts; `None` when all prompts are listed.
#[derive(Debug, Clone, Default)]
pub struct PromptScope {
    pub agent_id: Option<ResourceId>,
}

pub type AgentsSlice = ResourceSlice<Agent, AgentOptions>;
pub type ToolsSlice = ResourceSlice<Tool>;
pub type ModelsSlice = ResourceSlice<ModelConfig>;
pub type PromptsSlice = ResourceSlice<Prompt, PromptScope>;
/// `extra` holds the filter of the last applied fetch.
pub type TriggersSlice = ResourceSlice<TriggerRecord, TriggerQuery>;

/// Profile and auth lifecycle. Tokens live in the shared session, not here.
#[derive(Debug, Clone, Default)]
pub struct AuthSlice {
    pub user: Option<User>,
    lifecycle: Lifecycle,
}

impl Slice for AuthSlice {
    const KEY: SliceKey = SliceKey::Auth;

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentdesk_core::ToolPatch;
    use agentdesk_test_utils::fixtures;

    #[test]
    fn append_never_duplicates_an_id() {
        let mut slice = ToolsSlice::default();
        slice.append(fixtures::tool("t1", "search"));
        slice.append(fixtures::tool("t1", "search-v2"));
        assert_eq!(slice.items.len(), 1);
        assert_eq!(slice.items[0].name, "search-v2");
    }

    #[test]
    fn patch_on_unknown_id_is_a_no_op() {
        let mut slice = ToolsSlice::default();
        slice.append(fixtures::tool("t1", "search"));
        let patch = ToolPatch {
            enabled: Some(false),
            ..ToolPatch::default()
        };
        assert!(!slice.apply_patch(&"t2".into(), &patch));
        assert!(slice.items[0].enabled);
        assert!(slice.apply_patch(&"t1".into(), &patch));
        assert!(!slice.items[0].enabled);
    }

    #[test]
    fn keys_name_their_slices() {
        assert_eq!(<AgentsSlice as Slice>::KEY, SliceKey::Agents);
        assert_eq!(<TriggersSlice as Slice>::KEY.as_str(), "agent_triggers");
    }
}
