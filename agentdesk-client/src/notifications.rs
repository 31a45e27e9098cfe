//! Transient notifications and the event channel from the adapter to the
//! front end.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const SESSION_EXPIRED: &str = "Session expired, please sign in again";
pub const REQUEST_FAILED: &str = "Request failed";
pub const SERVER_UNREACHABLE: &str = "Server unreachable, check the network connection";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            level,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, message)
    }

    /// Age in whole seconds, used to expire toasts.
    pub fn age_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_seconds()
    }
}

/// Side effects the adapter asks the front end to perform.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    Notify(Notification),
    /// A 401 cleared the session; the front end must show the login view.
    SessionExpired,
}
