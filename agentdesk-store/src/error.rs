//! Error type returned by store operations.
//!
//! Every failure has already been recorded in the slice (or deliberately
//! ignored) by the time one of these reaches the caller.

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// The operation settled as rejected; the slice `error` holds `message`.
    #[error("{message}")]
    Rejected { message: String },

    /// Cancelled before settlement. Only `loading` was settled.
    #[error("operation cancelled")]
    Cancelled,

    /// A newer request of the same kind settled first; the result was dropped.
    #[error("superseded by a newer request")]
    Superseded,

    /// The backend answered 401 and the session was cleared.
    #[error("session expired")]
    Unauthorized,
}

impl StoreError {
    /// Whether the view should surface this outcome to the operator.
    pub fn is_reportable(&self) -> bool {
        matches!(self, StoreError::Rejected { .. })
    }
}
