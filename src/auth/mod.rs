//! Sign-in, sign-out and the signed-in user.

mod guard;

use std::sync::Arc;

use majex_api_types::{LoginRequest, LoginSuccess, User};
use reqwest::Method;
use serde_json::json;
use tracing::{info, warn};

pub use guard::{Redirect, RouteGuard};

use crate::http::{ApiClient, ApiError};
use crate::session::{Session, SessionStore};

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
    sessions: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        let sessions = Arc::clone(api.sessions());
        Self { api, sessions }
    }

    /// Exchange credentials for a bearer token. Nothing is persisted unless
    /// the backend accepts the credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::invalid_input("email and password are required"));
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let LoginSuccess { token, user } =
            self.api.send_json(Method::POST, "login", &request).await?;

        let session = Session { token, user };
        self.sessions.set(&session)?;
        info!(user_id = session.user.id, "Admin signed in");
        Ok(session)
    }

    /// Revoke the token remotely, then forget it locally whatever the backend
    /// answered.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let remote = self
            .api
            .send_json_unit(Method::POST, "logout", &json!({}))
            .await;
        self.sessions.clear()?;
        match remote {
            Ok(()) => {
                info!("Admin signed out");
                Ok(())
            }
            Err(ApiError::Unauthorized) => Ok(()),
            Err(err) => {
                warn!(error = %err, "Backend logout failed; local session cleared anyway");
                Err(err)
            }
        }
    }

    /// Re-validate a persisted token at startup and refresh the stored user.
    /// An unusable token is discarded.
    pub async fn restore(&self) -> Result<Option<User>, ApiError> {
        let Some(session) = self.sessions.get()? else {
            return Ok(None);
        };

        match self.api.get::<User>("user").await {
            Ok(user) => {
                self.sessions.set(&Session {
                    token: session.token,
                    user: user.clone(),
                })?;
                Ok(Some(user))
            }
            Err(err) => {
                warn!(error = %err, "Stored session rejected; signing out");
                self.sessions.clear()?;
                Ok(None)
            }
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.current_session().map(|session| session.user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_session().is_some()
    }

    fn current_session(&self) -> Option<Session> {
        self.sessions.get().unwrap_or_else(|err| {
            warn!(error = %err, "Session unreadable; treating as signed out");
            None
        })
    }
}
