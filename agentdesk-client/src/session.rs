//! Session tokens and their durable storage.
//!
//! The in-memory token pair and the durable copy are only ever written
//! together, under the same lock, so a reader never sees one without the
//! other.

use crate::error::StorageError;
use agentdesk_core::TokenPair;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Durable home of the token pair between runs.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Result<Option<TokenPair>, StorageError>;
    fn store(&self, tokens: &TokenPair) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// On-disk layout; the key names match what earlier console builds wrote.
#[derive(Serialize, Deserialize)]
struct StoredTokens {
    token: String,
    #[serde(default)]
    refresh_token: String,
}

/// JSON file token storage.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Option<TokenPair>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let stored = serde_json::from_str::<StoredTokens>(&contents)?;
        if stored.token.is_empty() {
            return Ok(None);
        }
        Ok(Some(TokenPair {
            access_token: stored.token,
            refresh_token: stored.refresh_token,
        }))
    }

    fn store(&self, tokens: &TokenPair) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let stored = StoredTokens {
            token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
        };
        std::fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Process-local token storage. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStorage {
    slot: Arc<Mutex<Option<TokenPair>>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(tokens))),
        }
    }

    /// Current durable contents.
    pub fn snapshot(&self) -> Option<TokenPair> {
        let slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        (*slot).clone()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Option<TokenPair>, StorageError> {
        Ok(self.snapshot())
    }

    fn store(&self, tokens: &TokenPair) -> Result<(), StorageError> {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut slot = self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
        Ok(())
    }
}

struct SessionInner {
    tokens: Option<TokenPair>,
    storage: Box<dyn TokenStorage>,
}

/// Shared handle to the current session. Clones observe the same state.
#[derive(Clone)]
pub struct Session {
    inner: Arc<RwLock<SessionInner>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    /// Restore the session from durable storage. Unreadable storage starts
    /// signed out.
    pub fn load(storage: impl TokenStorage + 'static) -> Self {
        let tokens = match storage.load() {
            Ok(tokens) => tokens,
            Err(err) => {
                tracing::warn!(error = %err, "stored session unreadable, starting signed out");
                None
            }
        };
        Self {
            inner: Arc::new(RwLock::new(SessionInner {
                tokens,
                storage: Box::new(storage),
            })),
        }
    }

    /// Signed-out session backed by process memory only.
    pub fn in_memory() -> Self {
        Self::load(MemoryTokenStorage::new())
    }

    fn read(&self) -> RwLockReadGuard<'_, SessionInner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionInner> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().tokens.as_ref().map(|tokens| tokens.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().tokens.as_ref().map(|tokens| tokens.refresh_token.clone())
    }

    pub fn tokens(&self) -> Option<TokenPair> {
        self.read().tokens.clone()
    }

    /// Presence of an access token is the only authentication gate.
    pub fn is_authenticated(&self) -> bool {
        self.read()
            .tokens
            .as_ref()
            .is_some_and(|tokens| !tokens.access_token.is_empty())
    }

    /// Persist a freshly issued token pair. When the durable write fails the
    /// in-memory session is left as it was.
    pub fn establish(&self, tokens: TokenPair) -> Result<(), StorageError> {
        let mut inner = self.write();
        inner.storage.store(&tokens)?;
        inner.tokens = Some(tokens);
        tracing::debug!("session established");
        Ok(())
    }

    /// Drop the token pair. Memory is always cleared; a failing durable
    /// clear is reported to the caller.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut inner = self.write();
        inner.tokens = None;
        let result = inner.storage.clear();
        tracing::debug!("session cleared");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> TokenPair {
        TokenPair {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
        }
    }

    #[test]
    fn establish_and_clear_reach_storage() {
        let storage = MemoryTokenStorage::new();
        let session = Session::load(storage.clone());
        assert!(!session.is_authenticated());

        session.establish(pair()).unwrap();
        assert_eq!(session.access_token().as_deref(), Some("access"));
        assert_eq!(storage.snapshot(), Some(pair()));

        session.clear().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(storage.snapshot(), None);
    }

    #[test]
    fn session_is_restored_from_storage() {
        let session = Session::load(MemoryTokenStorage::with_tokens(pair()));
        assert!(session.is_authenticated());
        assert_eq!(session.refresh_token().as_deref(), Some("refresh"));
    }

    #[test]
    fn file_storage_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("nested").join("session.json"));
        assert!(storage.load().unwrap().is_none());

        storage.store(&pair()).unwrap();
        let raw = std::fs::read_to_string(storage.path()).unwrap();
        assert!(raw.contains("\"token\""));
        assert!(raw.contains("\"refresh_token\""));
        assert_eq!(storage.load().unwrap(), Some(pair()));

        storage.clear().unwrap();
        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_session_file_starts_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        let session = Session::load(FileTokenStorage::new(path));
        assert!(!session.is_authenticated());
    }
}
