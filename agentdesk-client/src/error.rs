//! Error types for the HTTP adapter and token storage.

use agentdesk_core::EnvelopeError;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ApiClientError {
    /// The backend answered 401. The session has already been cleared.
    #[error("session expired")]
    Unauthorized,

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// No response arrived: connect failure or timeout.
    #[error("server unreachable: {0}")]
    Network(String),

    /// The request could not be built.
    #[error("request error: {0}")]
    Request(String),

    /// A 2xx envelope with `success: false`, or without its payload.
    #[error("{0}")]
    Business(String),

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiClientError {
    /// Text suitable for a slice `error` field. Server-provided messages are
    /// passed through as-is; everything else falls back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiClientError::Status { message, .. } | ApiClientError::Business(message)
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiClientError::Unauthorized)
    }
}

impl From<EnvelopeError> for ApiClientError {
    fn from(err: EnvelopeError) -> Self {
        ApiClientError::Business(err.message().to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_passes_server_text_through() {
        let err = ApiClientError::Status {
            status: 404,
            message: "tool not found".into(),
        };
        assert_eq!(err.user_message("failed to delete tool"), "tool not found");
        let err = ApiClientError::Network("timed out".into());
        assert_eq!(err.user_message("failed to delete tool"), "failed to delete tool");
    }

    #[test]
    fn envelope_errors_become_business_errors() {
        let err: ApiClientError = EnvelopeError::Rejected {
            message: "duplicate name".into(),
        }
        .into();
        assert_eq!(err, ApiClientError::Business("duplicate name".into()));
    }
}
