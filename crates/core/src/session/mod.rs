//! Per-session state: the selection cart, the last browse result, and the
//! upstream credentials.
//!
//! Sessions live in process memory only. Nothing here is persisted, and
//! nothing is evicted: a session lasts until it is removed or the process
//! exits.

pub mod cart;

use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use crate::provider::{ProductRecord, UpstreamCredentials};

/// Everything we remember about one session.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    /// Selected product source ids.
    pub cart: BTreeSet<i64>,
    /// Products from the most recent browse, used to resolve the cart on save.
    pub browse_cache: Vec<ProductRecord>,
    /// Credentials for the upstream catalog, if the trader supplied them.
    pub upstream: Option<UpstreamCredentials>,
}

/// Process-local session map.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionData>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionData>> {
        // Plain data only, so a poisoned lock is still consistent.
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of the session's data (empty if the session does not exist).
    pub fn snapshot(&self, session_id: &str) -> SessionData {
        self.lock().get(session_id).cloned().unwrap_or_default()
    }

    /// Mutate a session in place, creating it if needed.
    pub fn update<R>(&self, session_id: &str, f: impl FnOnce(&mut SessionData) -> R) -> R {
        let mut sessions = self.lock();
        let data = sessions.entry(session_id.to_string()).or_default();
        f(data)
    }

    /// Drop a session entirely. Returns true if it existed.
    pub fn remove(&self, session_id: &str) -> bool {
        self.lock().remove(session_id).is_some()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
