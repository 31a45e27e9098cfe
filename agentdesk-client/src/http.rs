//! The single outbound HTTP adapter.

use crate::error::ApiClientError;
use crate::notifications::{
    ClientEvent, Notification, NotificationLevel, REQUEST_FAILED, SERVER_UNREACHABLE, SESSION_EXPIRED,
};
use crate::services::{AgentService, ModelService, PromptService, ToolService, TriggerService, UserService};
use crate::session::Session;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::mpsc;

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl HttpConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Cheaply clonable handle; clones share the connection pool, the session
/// and the event channel.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    session: Session,
    events: mpsc::UnboundedSender<ClientEvent>,
}

impl HttpClient {
    pub fn new(
        config: &HttpConfig,
        session: Session,
        events: mpsc::UnboundedSender<ClientEvent>,
    ) -> Result<Self, ApiClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ApiClientError::Request(err.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            events,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn agents(&self) -> AgentService<'_> {
        AgentService::new(self)
    }

    pub fn tools(&self) -> ToolService<'_> {
        ToolService::new(self)
    }

    pub fn models(&self) -> ModelService<'_> {
        ModelService::new(self)
    }

    pub fn prompts(&self) -> PromptService<'_> {
        PromptService::new(self)
    }

    pub fn triggers(&self) -> TriggerService<'_> {
        TriggerService::new(self)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(self)
    }

    pub async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
    {
        self.send(Method::GET, path, |request| {
            if query.is_empty() {
                request
            } else {
                request.query(query)
            }
        })
        .await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, |request| request.json(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, path, |request| request.json(body)).await
    }

    pub async fn delete<T>(&self, path: &str) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
    {
        self.send(Method::DELETE, path, |request| request).await
    }

    async fn send<T, F>(&self, method: Method, path: &str, build: F) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method.clone(), &url);
        // The token is captured here; a session change while this request is
        // in flight does not affect it.
        if let Some(token) = self.session.access_token() {
            request = request.bearer_auth(token);
        }
        let request = build(request);

        tracing::debug!(%method, path, "dispatching request");
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return Err(self.transport_failure(&method, path, err)),
        };
        self.parse_response(&method, path, response).await
    }

    async fn parse_response<T: DeserializeOwned>(
        &self,
        method: &Method,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        let status = response.status();
        tracing::debug!(%method, path, status = status.as_u16(), "response received");

        if status == StatusCode::UNAUTHORIZED {
            self.expire_session();
            return Err(ApiClientError::Unauthorized);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = server_message(&text).unwrap_or_else(|| REQUEST_FAILED.to_string());
            tracing::warn!(%method, path, status = status.as_u16(), %message, "request rejected");
            self.notify(Notification::error(message.clone()));
            return Err(ApiClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => return Err(self.transport_failure(method, path, err)),
        };
        let decoded = if status == StatusCode::NO_CONTENT || body.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value(Value::Null)
        } else {
            serde_json::from_slice(&body)
        };
        decoded.map_err(|err| {
            tracing::error!(%method, path, error = %err, "response body did not decode");
            self.notify(Notification::error(REQUEST_FAILED));
            ApiClientError::Decode(err.to_string())
        })
    }

    fn transport_failure(&self, method: &Method, path: &str, err: reqwest::Error) -> ApiClientError {
        if err.is_builder() {
            tracing::warn!(%method, path, error = %err, "request could not be built");
            let message = format!("Request error: {}", err);
            self.notify(Notification::error(message));
            return ApiClientError::Request(err.to_string());
        }
        tracing::warn!(%method, path, error = %err, timeout = err.is_timeout(), "no response from server");
        self.notify(Notification::error(SERVER_UNREACHABLE));
        ApiClientError::Network(err.to_string())
    }

    /// Unconditional on any 401: no retry and no refresh exchange.
    fn expire_session(&self) {
        if let Err(err) = self.session.clear() {
            tracing::warn!(error = %err, "failed to clear stored session");
        }
        tracing::warn!("session rejected by server, signing out");
        let _ = self.events.send(ClientEvent::SessionExpired);
        self.notify(Notification::new(NotificationLevel::Warning, SESSION_EXPIRED));
    }

    fn notify(&self, notification: Notification) {
        let _ = self.events.send(ClientEvent::Notify(notification));
    }
}

/// `detail` (or `message`) from an error body, when it is a plain string.
fn server_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body).ok()?;
    ["detail", "message"].iter().find_map(|key| {
        value
            .get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_prefers_detail() {
        assert_eq!(
            server_message(r#"{"detail": "not found", "message": "other"}"#).as_deref(),
            Some("not found")
        );
        assert_eq!(server_message(r#"{"message": "bad input"}"#).as_deref(), Some("bad input"));
        assert_eq!(server_message(r#"{"detail": [{"loc": ["body"]}]}"#), None);
        assert_eq!(server_message("<html>502</html>"), None);
    }
}
