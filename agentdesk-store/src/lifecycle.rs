//! Per-slice operation lifecycle: pending count, error and sequence guard.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    FetchList,
    FetchOne,
    FetchOptions,
    Create,
    Update,
    Delete,
    Login,
    FetchProfile,
    UpdateProfile,
}

impl OpKind {
    /// Kinds whose responses replace state wholesale. For these a response
    /// older than the latest settled one of the same kind is discarded.
    pub fn is_sequenced(self) -> bool {
        matches!(self, OpKind::FetchList | OpKind::FetchOptions | OpKind::FetchProfile)
    }
}

/// Handle for one dispatched operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    kind: OpKind,
    seq: u64,
}

impl Ticket {
    pub fn kind(&self) -> OpKind {
        self.kind
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    pending: usize,
    issued: HashMap<OpKind, u64>,
    settled: HashMap<OpKind, u64>,
    error: Option<String>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// True exactly while at least one operation is unsettled.
    pub fn loading(&self) -> bool {
        self.pending > 0
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub(crate) fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Pending transition: `loading` on, `error` cleared.
    pub fn begin(&mut self, kind: OpKind) -> Ticket {
        self.pending += 1;
        self.error = None;
        let seq = self.issued.entry(kind).or_insert(0);
        *seq += 1;
        Ticket { kind, seq: *seq }
    }

    /// Whether a result for `ticket` may still be applied.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        if !ticket.kind.is_sequenced() {
            return true;
        }
        ticket.seq > self.settled.get(&ticket.kind).copied().unwrap_or(0)
    }

    pub fn fulfil(&mut self, ticket: Ticket) {
        self.settle(ticket);
    }

    pub fn reject(&mut self, ticket: Ticket, message: impl Into<String>) {
        self.settle(ticket);
        self.error = Some(message.into());
    }

    /// Settle without applying anything: cancelled, stale or unauthorized.
    pub fn abandon(&mut self, _ticket: Ticket) {
        self.pending = self.pending.saturating_sub(1);
    }

    fn settle(&mut self, ticket: Ticket) {
        self.pending = self.pending.saturating_sub(1);
        if ticket.kind.is_sequenced() {
            let settled = self.settled.entry(ticket.kind).or_insert(0);
            *settled = (*settled).max(ticket.seq);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_tracks_every_unsettled_operation() {
        let mut lifecycle = Lifecycle::new();
        let a = lifecycle.begin(OpKind::FetchList);
        let b = lifecycle.begin(OpKind::Delete);
        assert!(lifecycle.loading());
        lifecycle.fulfil(b);
        assert!(lifecycle.loading());
        lifecycle.abandon(a);
        assert!(!lifecycle.loading());
    }

    #[test]
    fn older_list_response_is_stale_once_a_newer_one_settled() {
        let mut lifecycle = Lifecycle::new();
        let first = lifecycle.begin(OpKind::FetchList);
        let second = lifecycle.begin(OpKind::FetchList);
        assert!(lifecycle.is_current(&second));
        lifecycle.fulfil(second);
        assert!(!lifecycle.is_current(&first));
    }

    #[test]
    fn in_order_list_responses_both_apply() {
        let mut lifecycle = Lifecycle::new();
        let first = lifecycle.begin(OpKind::FetchList);
        let second = lifecycle.begin(OpKind::FetchList);
        assert!(lifecycle.is_current(&first));
        lifecycle.fulfil(first);
        assert!(lifecycle.is_current(&second));
    }

    #[test]
    fn mutations_are_never_stale() {
        let mut lifecycle = Lifecycle::new();
        let first = lifecycle.begin(OpKind::Update);
        let second = lifecycle.begin(OpKind::Update);
        lifecycle.fulfil(second);
        assert!(lifecycle.is_current(&first));
    }

    #[test]
    fn dispatch_clears_previous_error() {
        let mut lifecycle = Lifecycle::new();
        let ticket = lifecycle.begin(OpKind::Create);
        lifecycle.reject(ticket, "name taken");
        assert_eq!(lifecycle.error(), Some("name taken"));
        assert!(!lifecycle.loading());
        lifecycle.begin(OpKind::Create);
        assert_eq!(lifecycle.error(), None);
    }
}
