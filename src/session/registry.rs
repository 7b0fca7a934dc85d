//! Sessions keyed by client identifier.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::session::Session;

/// Live sessions, one per client.
///
/// A front end that serves several users keeps one session per user key.
/// Sessions are removed explicitly with [`SessionRegistry::evict`].
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, Session>,
}

impl SessionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `session` under `key`, replacing any previous session, and
    /// return it.
    pub fn create(&mut self, key: impl Into<String>, session: Session) -> &mut Session {
        match self.sessions.entry(key.into()) {
            Entry::Occupied(mut entry) => {
                entry.insert(session);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(session),
        }
    }

    /// Session stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Session> {
        self.sessions.get(key)
    }

    /// Mutable session stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Session> {
        self.sessions.get_mut(key)
    }

    /// Remove and return the session stored under `key`.
    pub fn evict(&mut self, key: &str) -> Option<Session> {
        self.sessions.remove(key)
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True if no session is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
