//! Persisted admin session: a bearer token plus the signed-in user.
//!
//! Every consumer (request interceptor, route guard, auth service) reads and
//! writes the session through [`SessionStore`], so there is exactly one source
//! of truth for "who is signed in".

mod file;
mod memory;

use std::path::PathBuf;

use majex_api_types::User;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key of the serialized user record.
pub const USER_KEY: &str = "auth_user";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to access session file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("session file {} is malformed: {source}", .path.display())]
    Format {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub trait SessionStore: Send + Sync {
    fn get(&self) -> Result<Option<Session>, SessionError>;

    fn set(&self, session: &Session) -> Result<(), SessionError>;

    fn clear(&self) -> Result<(), SessionError>;

    fn token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.get()?.map(|session| session.token))
    }
}
