//! In-memory session table.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use fixture_core::SessionId;
use parking_lot::RwLock;
use serde::Serialize;

/// Attributes stored for a logged-in session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    /// The user that logged in.
    pub username: String,
}

/// Maps session identifiers to their records for the life of the process.
///
/// No expiry and no persistence. The lock is never held across an `.await`.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session for `username` under a fresh identifier.
    pub fn create(&self, username: impl Into<String>) -> SessionId {
        let username = username.into();
        let mut sessions = self.sessions.write();
        loop {
            let id = SessionId::generate();
            if let Entry::Vacant(slot) = sessions.entry(id.as_str().to_owned()) {
                let _ = slot.insert(SessionRecord { username });
                return id;
            }
        }
    }

    /// Look up a session by identifier.
    pub fn get(&self, id: &str) -> Option<SessionRecord> {
        self.sessions.read().get(id).cloned()
    }

    /// Whether `id` names a live session.
    pub fn contains(&self, id: &str) -> bool {
        self.sessions.read().contains_key(id)
    }

    /// Drop a session. Unknown identifiers are ignored.
    pub fn remove(&self, id: &str) -> Option<SessionRecord> {
        self.sessions.write().remove(id)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Whether no session is live.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn new_store_is_empty() {
        let store = SessionStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn create_then_get() {
        let store = SessionStore::new();
        let id = store.create("testuser");
        assert_eq!(
            store.get(id.as_str()),
            Some(SessionRecord {
                username: "testuser".into()
            })
        );
        assert!(store.contains(id.as_str()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn each_login_gets_its_own_session() {
        let store = SessionStore::new();
        let a = store.create("testuser");
        let b = store.create("testuser");
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn unknown_id_is_absent() {
        let store = SessionStore::new();
        let _ = store.create("testuser");
        assert!(store.get("not-a-session").is_none());
        assert!(store.get("").is_none());
    }

    #[test]
    fn remove_is_idempotent() {
        let store = SessionStore::new();
        let id = store.create("testuser");
        assert!(store.remove(id.as_str()).is_some());
        assert!(store.remove(id.as_str()).is_none());
        assert!(store.get(id.as_str()).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn remove_leaves_other_sessions() {
        let store = SessionStore::new();
        let a = store.create("alice");
        let b = store.create("bob");
        let _ = store.remove(a.as_str());
        assert_eq!(store.get(b.as_str()).unwrap().username, "bob");
    }

    #[test]
    fn concurrent_creates_are_all_recorded() {
        let store = Arc::new(SessionStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..100)
                        .map(|_| store.create("testuser"))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: Vec<SessionId> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(ids.len(), 800);
        assert_eq!(store.len(), 800);
        assert!(ids.iter().all(|id| store.contains(id.as_str())));
    }
}
