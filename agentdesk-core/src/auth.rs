//! Administrator identity and session credentials.

use crate::entity::{merge_opt, null_as_default, Entity};
use crate::error::ValidationError;
use crate::identity::ResourceId;
use crate::page::Envelope;
use crate::validation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The signed-in administrator's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: ResourceId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl Entity for User {
    type Patch = UserPatch;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn apply_patch(&mut self, patch: &UserPatch) {
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        merge_opt(&mut self.username, &patch.username);
    }
}

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(password) = &self.password {
            if password.chars().count() < 8 {
                return Err(ValidationError::new("password", "must be at least 8 characters"));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for UserPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPatch")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        validation::require("password", &self.password)
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    validation::require("email", email)?;
    let trimmed = email.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ValidationError::new("email", "is not a valid address")),
    }
}

/// Access and refresh token issued at login. Both are opaque.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Login responses come back either bare or inside the usual envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LoginResponse {
    Bare(TokenPair),
    Enveloped(Envelope<TokenPair>),
}

impl LoginResponse {
    pub fn into_tokens(self) -> Result<TokenPair, crate::error::EnvelopeError> {
        match self {
            LoginResponse::Bare(tokens) => Ok(tokens),
            LoginResponse::Enveloped(envelope) => envelope.require_data("login failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_shapes() {
        let bare: LoginResponse =
            serde_json::from_str(r#"{"access_token": "a", "refresh_token": "r"}"#).unwrap();
        assert_eq!(bare.into_tokens().unwrap().access_token, "a");

        let wrapped: LoginResponse = serde_json::from_str(
            r#"{"success": true, "data": {"access_token": "a2", "refresh_token": "r2"}}"#,
        )
        .unwrap();
        assert_eq!(wrapped.into_tokens().unwrap().refresh_token, "r2");

        let denied: LoginResponse =
            serde_json::from_str(r#"{"success": false, "message": "bad password"}"#).unwrap();
        assert_eq!(denied.into_tokens().unwrap_err().message(), "bad password");
    }

    #[test]
    fn credentials_never_print() {
        let req = LoginRequest {
            email: "admin@example.com".into(),
            password: "hunter22".into(),
        };
        assert!(!format!("{:?}", req).contains("hunter22"));
        let tokens = TokenPair {
            access_token: "s3cr3t-access".into(),
            refresh_token: "s3cr3t-refresh".into(),
        };
        let printed = format!("{:?}", tokens);
        assert!(!printed.contains("s3cr3t-access"));
        assert!(!printed.contains("s3cr3t-refresh"));
    }

    #[test]
    fn email_shape_is_checked() {
        let req = LoginRequest {
            email: "admin".into(),
            password: "x".into(),
        };
        assert_eq!(req.validate().unwrap_err().field, "email");
    }
}
