//! In-memory session storage keyed by trainee.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::training::{Session, UserId};

/// Holds at most one session per trainee for the life of the process.
pub trait SessionStore: Send + Sync {
    fn get(&self, trainee: &UserId) -> Option<Session>;
    fn set(&self, trainee: &UserId, session: Session);
    fn delete(&self, trainee: &UserId);
    fn len(&self) -> usize;

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<UserId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned map is still structurally valid; keep serving it.
    fn sessions(&self) -> std::sync::MutexGuard<'_, HashMap<UserId, Session>> {
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, trainee: &UserId) -> Option<Session> {
        self.sessions().get(trainee).cloned()
    }

    fn set(&self, trainee: &UserId, session: Session) {
        self.sessions().insert(trainee.clone(), session);
    }

    fn delete(&self, trainee: &UserId) {
        self.sessions().remove(trainee);
    }

    fn len(&self) -> usize {
        self.sessions().len()
    }
}
