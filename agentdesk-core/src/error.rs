//! Error types for domain-level checks

use thiserror::Error;

/// A form value rejected before anything is dispatched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// A response envelope that did not carry a usable payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("{message}")]
    Rejected { message: String },

    #[error("{fallback}")]
    MissingData { fallback: String },
}

impl EnvelopeError {
    pub fn message(&self) -> &str {
        match self {
            EnvelopeError::Rejected { message } => message,
            EnvelopeError::MissingData { fallback } => fallback,
        }
    }
}
