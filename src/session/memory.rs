use std::sync::RwLock;

use super::{Session, SessionError, SessionStore};
use crate::lock;

/// Process-local store. Sessions do not survive a restart.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            slot: RwLock::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<Session>, SessionError> {
        Ok(lock::read(&self.slot, "session.memory.get").clone())
    }

    fn set(&self, session: &Session) -> Result<(), SessionError> {
        *lock::write(&self.slot, "session.memory.set") = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *lock::write(&self.slot, "session.memory.clear") = None;
        Ok(())
    }
}
