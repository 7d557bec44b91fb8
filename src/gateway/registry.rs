use std::fmt;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::session::Session;

#[derive(Debug)]
pub enum RegistryError {
    /// A connection identifier was admitted twice. Transport connects always
    /// mint a fresh id, so this is a caller bug, not a runtime condition.
    DuplicateSession(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateSession(id) => {
                write!(f, "session {id} is already registered")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// Tracks the exact set of currently connected sessions.
///
/// Pure in-memory leaf: no I/O, no ordering between entries. Concurrent
/// `admit`/`remove`/`for_each` are safe; a session removed mid-iteration is
/// either visited or not, never corrupted.
pub struct Registry {
    sessions: DashMap<String, Session>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn admit(&self, session: Session) -> Result<(), RegistryError> {
        match self.sessions.entry(session.session_id.clone()) {
            Entry::Occupied(_) => Err(RegistryError::DuplicateSession(session.session_id)),
            Entry::Vacant(entry) => {
                entry.insert(session);
                Ok(())
            }
        }
    }

    /// Deregister a session. Unknown ids are a no-op: disconnect races are
    /// normal, not errors.
    pub fn remove(&self, session_id: &str) {
        self.sessions.remove(session_id);
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Apply `f` to every live session, in no guaranteed order.
    pub fn for_each<F: FnMut(&Session)>(&self, mut f: F) {
        for entry in self.sessions.iter() {
            f(entry.value());
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snowflake;
    use tokio::sync::mpsc;

    fn session(id: &str) -> Session {
        let (tx, _rx) = mpsc::unbounded_channel();
        Session {
            session_id: id.to_string(),
            connected_at: crate::db::now_rfc3339(),
            tx,
        }
    }

    #[test]
    fn live_set_is_admits_minus_removes() {
        let registry = Registry::new();
        registry.admit(session("a")).unwrap();
        registry.admit(session("b")).unwrap();
        registry.admit(session("c")).unwrap();
        registry.remove("b");

        let mut seen = Vec::new();
        registry.for_each(|s| seen.push(s.session_id.clone()));
        seen.sort();
        assert_eq!(seen, vec!["a", "c"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a"));
        assert!(!registry.contains("b"));
    }

    #[test]
    fn duplicate_admit_is_rejected() {
        let registry = Registry::new();
        registry.admit(session("a")).unwrap();
        let err = registry.admit(session("a")).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateSession(ref id) if id == "a"));
        // The original session survives the rejected admission.
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn removing_unknown_id_is_a_noop() {
        let registry = Registry::new();
        registry.admit(session("a")).unwrap();
        registry.remove("never-connected");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn snowflake_ids_never_collide_across_admits() {
        let registry = Registry::new();
        for _ in 0..50 {
            registry.admit(session(&snowflake::generate())).unwrap();
        }
        assert_eq!(registry.len(), 50);
    }
}
