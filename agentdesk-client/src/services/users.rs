use super::UpdateResponse;
use crate::error::ApiClientError;
use crate::http::HttpClient;
use crate::paths;
use agentdesk_core::{Envelope, LoginRequest, LoginResponse, User, UserPatch};

pub struct UserService<'a> {
    http: &'a HttpClient,
}

impl<'a> UserService<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn admin_login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiClientError> {
        self.http.post(paths::ADMIN_LOGIN, credentials).await
    }

    pub async fn get_profile(&self) -> Result<Envelope<User>, ApiClientError> {
        self.http.get(paths::PROFILE, &[]).await
    }

    pub async fn update_profile(&self, patch: &UserPatch) -> Result<UpdateResponse, ApiClientError> {
        self.http.put(paths::PROFILE, patch).await
    }
}
