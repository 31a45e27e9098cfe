use crate::error::StoreError;
use crate::lifecycle::OpKind;
use crate::slice::Slice;
use crate::state;
use crate::store::Store;
use agentdesk_client::ApiClientError;
use agentdesk_core::{Entity, LoginRequest, User, UserPatch};
use tokio_util::sync::CancellationToken;

/// Shown when login is refused without a server message.
pub const LOGIN_FAILED: &str = "login failed";
const PROFILE_FALLBACK: &str = "failed to load profile";
const PROFILE_UPDATE_FALLBACK: &str = "failed to update profile";

impl Store {
    /// Exchange credentials for tokens and persist them in the session.
    ///
    /// A 401 on the login endpoint means bad credentials here, so it is
    /// reported on the auth slice instead of being treated as an expiry.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<(), StoreError> {
        let call = async {
            let response = self.http().users().admin_login(credentials).await?;
            Ok::<_, ApiClientError>(response.into_tokens()?)
        };
        let session = self.session().clone();
        let outcome = self
            .dispatch(state::auth, OpKind::Login, None, LOGIN_FAILED, call, |auth, tokens| {
                match session.establish(tokens) {
                    Ok(()) => Ok(()),
                    Err(err) => {
                        tracing::error!(error = %err, "failed to persist session tokens");
                        let message = format!("{}: {}", LOGIN_FAILED, err);
                        auth.lifecycle_mut().set_error(message.clone());
                        Err(StoreError::Rejected { message })
                    }
                }
            })
            .await;

        match outcome {
            Ok(result) => {
                if result.is_ok() {
                    tracing::info!(email = %credentials.email, "logged in");
                }
                result
            }
            Err(StoreError::Unauthorized) => {
                self.update(state::auth, |auth| auth.lifecycle_mut().set_error(LOGIN_FAILED));
                Err(StoreError::Rejected {
                    message: LOGIN_FAILED.to_string(),
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Drop tokens and profile. Never fails from the caller's view; a
    /// storage error is logged and the in-memory session is cleared anyway.
    pub fn logout(&self) {
        if let Err(err) = self.session().clear() {
            tracing::warn!(error = %err, "failed to clear persisted session");
        }
        self.update(state::auth, |auth| {
            auth.user = None;
            auth.lifecycle_mut().clear_error();
        });
        tracing::info!("logged out");
    }

    pub async fn fetch_profile(&self, cancel: Option<&CancellationToken>) -> Result<User, StoreError> {
        let call = async {
            let envelope = self.http().users().get_profile().await?;
            Ok::<_, ApiClientError>(envelope.require_data(PROFILE_FALLBACK)?)
        };
        self.dispatch(
            state::auth,
            OpKind::FetchProfile,
            cancel,
            PROFILE_FALLBACK,
            call,
            |auth, user: User| {
                auth.user = Some(user.clone());
                user
            },
        )
        .await
    }

    /// Update the signed-in profile. The password is sent but never kept.
    pub async fn update_profile(
        &self,
        patch: &UserPatch,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), StoreError> {
        let call = async {
            let echoed = match self.http().users().update_profile(patch).await? {
                Some(envelope) => envelope.into_result(PROFILE_UPDATE_FALLBACK)?,
                None => None,
            };
            // A full profile replaces the cached one; a partial echo is ignored.
            Ok::<_, ApiClientError>(echoed.and_then(|data| serde_json::from_value::<User>(data).ok()))
        };
        self.dispatch(
            state::auth,
            OpKind::UpdateProfile,
            cancel,
            PROFILE_UPDATE_FALLBACK,
            call,
            |auth, echoed: Option<User>| {
                if let Some(user) = echoed {
                    auth.user = Some(user);
                } else if let Some(user) = auth.user.as_mut() {
                    user.apply_patch(patch);
                }
            },
        )
        .await
    }
}
