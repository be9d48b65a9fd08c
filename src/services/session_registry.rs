// src/services/session_registry.rs
use std::{collections::HashSet, fmt::Debug, sync::Arc};

use tokio::sync::RwLock;

/// The set of currently connected session ids.
///
/// Pure bookkeeping: no I/O, no errors. The registry is the only shared
/// mutable state in the engine; both mutations take the write lock so
/// concurrent callers never observe a torn membership set.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    inner: Arc<RwLock<HashSet<String>>>,
}

impl Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry").finish()
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a session id. Registering an id twice is a no-op.
    pub async fn register(&self, sid: &str) {
        let mut guard = self.inner.write().await;
        guard.insert(sid.to_string());
    }

    /// Remove a session id. Removing an absent id is a no-op.
    pub async fn unregister(&self, sid: &str) {
        let mut guard = self.inner.write().await;
        guard.remove(sid);
    }

    /// Snapshot copy of current membership. Stale as soon as it is returned
    /// if mutations race it; callers must not treat it as live.
    pub async fn active_ids(&self) -> HashSet<String> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// Number of connected sessions.
    pub async fn count(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_is_idempotent() {
        let registry = SessionRegistry::new();
        registry.register("abc").await;
        registry.register("abc").await;
        assert_eq!(registry.count().await, 1);
        registry.unregister("abc").await;
        assert_eq!(registry.count().await, 0);
        // Removing again is fine.
        registry.unregister("abc").await;
    }
}
