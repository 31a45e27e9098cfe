//! Persistence for lightweight UI state.

use crate::nav::View;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub active_view: View,
    /// Page size per paged view, keyed by view title.
    #[serde(default)]
    pub page_sizes: BTreeMap<String, u32>,
}

impl PersistedState {
    pub fn new(active_view: View) -> Self {
        Self {
            active_view,
            page_sizes: BTreeMap::new(),
        }
    }

    pub fn page_size(&self, view: View) -> Option<u32> {
        self.page_sizes.get(view.title()).copied().filter(|size| *size > 0)
    }

    pub fn set_page_size(&mut self, view: View, size: u32) {
        self.page_sizes.insert(view.title().to_string(), size);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub fn load(path: &Path) -> Result<Option<PersistedState>, PersistenceError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    let state = serde_json::from_str::<PersistedState>(&contents)?;
    Ok(Some(state))
}

pub fn save(path: &Path, state: &PersistedState) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(state)?;
    std::fs::write(path, contents)?;
    Ok(())
}
