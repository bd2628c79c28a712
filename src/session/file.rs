use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use majex_api_types::User;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{Session, SessionError, SessionStore, TOKEN_KEY, USER_KEY};

/// Stores the session as a small JSON document keyed by [`TOKEN_KEY`] and
/// [`USER_KEY`]. Writes go through a sibling temp file and a rename so a
/// crash never leaves a half-written session behind.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn format_error(&self, source: serde_json::Error) -> SessionError {
        SessionError::Format {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<Session>, SessionError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(err)),
        };

        let mut document: Map<String, Value> =
            serde_json::from_slice(&raw).map_err(|err| self.format_error(err))?;

        let Some(token) = document
            .remove(TOKEN_KEY)
            .and_then(|value| value.as_str().map(str::to_owned))
        else {
            return Ok(None);
        };

        let Some(user) = document.remove(USER_KEY) else {
            warn!(path = %self.path.display(), "Session token stored without a user record; ignoring");
            return Ok(None);
        };
        let user: User = serde_json::from_value(user).map_err(|err| self.format_error(err))?;

        Ok(Some(Session { token, user }))
    }

    fn set(&self, session: &Session) -> Result<(), SessionError> {
        let mut document = Map::new();
        document.insert(TOKEN_KEY.to_string(), Value::String(session.token.clone()));
        document.insert(
            USER_KEY.to_string(),
            serde_json::to_value(&session.user).map_err(|err| self.format_error(err))?,
        );
        let encoded =
            serde_json::to_vec_pretty(&document).map_err(|err| self.format_error(err))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, encoded).map_err(|err| self.io_error(err))?;
        fs::rename(&staging, &self.path).map_err(|err| self.io_error(err))?;
        debug!(path = %self.path.display(), "Session persisted");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session cleared");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }
}
