//! The store handle and the shared dispatch path.

use crate::error::StoreError;
use crate::lifecycle::OpKind;
use crate::slice::{Listed, ResourceSlice, Slice, SliceKey};
use crate::state::{AppState, AuthSnapshot};
use agentdesk_client::{ApiClientError, HttpClient, Session, UpdateResponse};
use agentdesk_core::{Envelope, ListPage, ListQuery, ResourceId};
use serde_json::Value;
use std::future::Future;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

const CHANGE_CAPACITY: usize = 64;

/// Published after every lifecycle transition of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreChange {
    pub slice: SliceKey,
}

type Select<S> = fn(&mut AppState) -> &mut S;

/// Cheaply clonable handle to the single state tree.
#[derive(Clone)]
pub struct Store {
    state: Arc<RwLock<AppState>>,
    http: HttpClient,
    changes: broadcast::Sender<StoreChange>,
}

impl Store {
    pub fn new(http: HttpClient) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(AppState::default())),
            http,
            changes,
        }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn session(&self) -> &Session {
        self.http.session()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }

    /// Run `f` against a read-only view of the state.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.read_guard())
    }

    pub fn snapshot(&self) -> AppState {
        self.read_guard().clone()
    }

    pub fn auth(&self) -> AuthSnapshot {
        let state = self.read_guard();
        AuthSnapshot::capture(&state.auth, self.http.session())
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, AppState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, AppState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Apply a synchronous change to one slice and announce it.
    pub(crate) fn update<S: Slice, R>(&self, select: Select<S>, f: impl FnOnce(&mut S) -> R) -> R {
        let result = {
            let mut state = self.write_guard();
            f(select(&mut state))
        };
        self.publish(S::KEY);
        result
    }

    fn publish(&self, slice: SliceKey) {
        // No subscribers is fine.
        let _ = self.changes.send(StoreChange { slice });
    }

    /// Drive one async operation through its lifecycle.
    ///
    /// The call runs with no lock held. On settlement exactly one of these
    /// happens under a short write lock:
    /// - unauthorized, cancelled or stale: only `loading` settles
    /// - fulfilled: `reduce` runs and its output is returned
    /// - rejected: `error` is set to the server message or `fallback`
    pub(crate) async fn dispatch<S, T, O, Fut, R>(
        &self,
        select: Select<S>,
        kind: OpKind,
        cancel: Option<&CancellationToken>,
        fallback: &str,
        call: Fut,
        reduce: R,
    ) -> Result<O, StoreError>
    where
        S: Slice,
        Fut: Future<Output = Result<T, ApiClientError>>,
        R: FnOnce(&mut S, T) -> O,
    {
        let ticket = self.update(select, |slice| slice.lifecycle_mut().begin(kind));
        tracing::debug!(slice = S::KEY.as_str(), ?kind, seq = ticket.seq(), "operation pending");

        let outcome = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => None,
                result = call => Some(result),
            },
            None => Some(call.await),
        };
        let cancelled = outcome.is_none() || cancel.is_some_and(CancellationToken::is_cancelled);

        let mut expired = false;
        let result = {
            let mut state = self.write_guard();
            let slice = select(&mut state);
            let current = slice.lifecycle().is_current(&ticket);
            match outcome {
                Some(Err(ApiClientError::Unauthorized)) => {
                    slice.lifecycle_mut().abandon(ticket);
                    expired = true;
                    Err(StoreError::Unauthorized)
                }
                _ if cancelled => {
                    slice.lifecycle_mut().abandon(ticket);
                    tracing::debug!(slice = S::KEY.as_str(), ?kind, "operation cancelled");
                    Err(StoreError::Cancelled)
                }
                _ if !current => {
                    slice.lifecycle_mut().abandon(ticket);
                    tracing::trace!(slice = S::KEY.as_str(), ?kind, seq = ticket.seq(), "discarding stale response");
                    Err(StoreError::Superseded)
                }
                Some(Ok(value)) => {
                    let output = reduce(slice, value);
                    slice.lifecycle_mut().fulfil(ticket);
                    tracing::debug!(slice = S::KEY.as_str(), ?kind, "operation fulfilled");
                    Ok(output)
                }
                Some(Err(err)) => {
                    let message = err.user_message(fallback);
                    tracing::debug!(slice = S::KEY.as_str(), ?kind, error = %err, "operation rejected");
                    slice.lifecycle_mut().reject(ticket, message.clone());
                    Err(StoreError::Rejected { message })
                }
                None => {
                    slice.lifecycle_mut().abandon(ticket);
                    Err(StoreError::Cancelled)
                }
            }
        };
        self.publish(S::KEY);
        if expired {
            self.expire();
        }
        result
    }

    /// The adapter already cleared the session on 401; drop the profile too.
    fn expire(&self) {
        self.update(crate::state::auth, |auth| auth.user = None);
    }

    pub(crate) async fn fetch_list<T, X, Fut>(
        &self,
        select: Select<ResourceSlice<T, X>>,
        query: ListQuery,
        cancel: Option<&CancellationToken>,
        call: Fut,
    ) -> Result<(), StoreError>
    where
        T: Listed,
        Fut: Future<Output = Result<Envelope<ListPage<T>>, ApiClientError>>,
    {
        self.fetch_list_with(select, query, cancel, call, |_| {}).await
    }

    /// Fetch-list that also records slice-specific context (the prompt
    /// owner, the trigger filter) in the same transition as the items.
    pub(crate) async fn fetch_list_with<T, X, Fut, E>(
        &self,
        select: Select<ResourceSlice<T, X>>,
        query: ListQuery,
        cancel: Option<&CancellationToken>,
        call: Fut,
        extra: E,
    ) -> Result<(), StoreError>
    where
        T: Listed,
        Fut: Future<Output = Result<Envelope<ListPage<T>>, ApiClientError>>,
        E: FnOnce(&mut X),
    {
        let fallback = format!("failed to load {}", T::PLURAL);
        let call = async {
            let page = call.await?.require_data(&fallback)?;
            Ok::<_, ApiClientError>(page)
        };
        self.dispatch(select, OpKind::FetchList, cancel, &fallback, call, |slice, page: ListPage<T>| {
            let pagination = page.resolve_pagination(&query);
            slice.replace(page.items, pagination, query);
            extra(&mut slice.extra);
        })
        .await
    }

    pub(crate) async fn fetch_one<T, X, Fut>(
        &self,
        select: Select<ResourceSlice<T, X>>,
        cancel: Option<&CancellationToken>,
        call: Fut,
    ) -> Result<T, StoreError>
    where
        T: Listed,
        Fut: Future<Output = Result<Envelope<T>, ApiClientError>>,
    {
        let fallback = format!("failed to load {}", T::SINGULAR);
        let call = async { Ok::<_, ApiClientError>(call.await?.require_data(&fallback)?) };
        self.dispatch(select, OpKind::FetchOne, cancel, &fallback, call, |slice, item: T| {
            slice.upsert(item.clone());
            item
        })
        .await
    }

    pub(crate) async fn create<T, X, Fut>(
        &self,
        select: Select<ResourceSlice<T, X>>,
        cancel: Option<&CancellationToken>,
        call: Fut,
    ) -> Result<T, StoreError>
    where
        T: Listed,
        Fut: Future<Output = Result<Envelope<T>, ApiClientError>>,
    {
        let fallback = format!("failed to create {}", T::SINGULAR);
        let call = async { Ok::<_, ApiClientError>(call.await?.require_data(&fallback)?) };
        self.dispatch(select, OpKind::Create, cancel, &fallback, call, |slice, item: T| {
            slice.append(item.clone());
            item
        })
        .await
    }

    /// The server's echo of the entity is not decoded; the local entity
    /// takes exactly the fields of `patch`.
    pub(crate) async fn update_entity<T, X, Fut>(
        &self,
        select: Select<ResourceSlice<T, X>>,
        id: ResourceId,
        patch: T::Patch,
        cancel: Option<&CancellationToken>,
        call: Fut,
    ) -> Result<(), StoreError>
    where
        T: Listed,
        Fut: Future<Output = Result<UpdateResponse, ApiClientError>>,
    {
        let fallback = format!("failed to update {}", T::SINGULAR);
        let call = async {
            if let Some(envelope) = call.await? {
                envelope.into_result(&fallback)?;
            }
            Ok::<_, ApiClientError>(())
        };
        self.dispatch(select, OpKind::Update, cancel, &fallback, call, move |slice, ()| {
            if !slice.apply_patch(&id, &patch) {
                tracing::debug!(%id, "updated entity is not in the current page");
            }
        })
        .await
    }

    pub(crate) async fn delete_entity<T, X, Fut>(
        &self,
        select: Select<ResourceSlice<T, X>>,
        id: ResourceId,
        cancel: Option<&CancellationToken>,
        call: Fut,
    ) -> Result<(), StoreError>
    where
        T: Listed,
        Fut: Future<Output = Result<Option<Envelope<Value>>, ApiClientError>>,
    {
        let fallback = format!("failed to delete {}", T::SINGULAR);
        let call = async {
            if let Some(envelope) = call.await? {
                envelope.into_result(&fallback)?;
            }
            Ok::<_, ApiClientError>(())
        };
        self.dispatch(select, OpKind::Delete, cancel, &fallback, call, move |slice, ()| {
            slice.remove(&id);
        })
        .await
    }

    /// Clear the error of one slice.
    pub fn clear_error(&self, slice: SliceKey) {
        use crate::state;
        match slice {
            SliceKey::Auth => self.update(state::auth, |s| s.lifecycle_mut().clear_error()),
            SliceKey::Agents => self.update(state::agents, |s| s.lifecycle_mut().clear_error()),
            SliceKey::Tools => self.update(state::tools, |s| s.lifecycle_mut().clear_error()),
            SliceKey::Models => self.update(state::models, |s| s.lifecycle_mut().clear_error()),
            SliceKey::Prompts => self.update(state::prompts, |s| s.lifecycle_mut().clear_error()),
            SliceKey::AgentTriggers => {
                self.update(state::agent_triggers, |s| s.lifecycle_mut().clear_error())
            }
        }
    }
}
