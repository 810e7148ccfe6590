use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::{session_revocation::SessionRevocationStore, time::Clock},
};
use crate::infrastructure::time::SystemClock;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

type Revocations = HashMap<String, DateTime<Utc>>;

/// Process-local revoked session ids, each kept until its token expires.
/// Revocations do not survive a restart.
pub struct InMemorySessionRevocationStore {
    revoked: Mutex<Revocations>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemorySessionRevocationStore {
    fn default() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }
}

impl InMemorySessionRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            revoked: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Lock the map with entries for already-expired tokens dropped.
    fn pruned(&self) -> ApplicationResult<MutexGuard<'_, Revocations>> {
        let mut guard = self
            .revoked
            .lock()
            .map_err(|_| ApplicationError::infrastructure("session store lock poisoned"))?;
        let now = self.clock.now();
        guard.retain(|_, expires_at| *expires_at > now);
        Ok(guard)
    }

    pub fn tracked_sessions(&self) -> ApplicationResult<usize> {
        Ok(self.pruned()?.len())
    }
}

#[async_trait]
impl SessionRevocationStore for InMemorySessionRevocationStore {
    async fn is_revoked(&self, session_id: &str) -> ApplicationResult<bool> {
        Ok(self.pruned()?.contains_key(session_id))
    }

    async fn revoke(&self, session_id: &str, expires_at: DateTime<Utc>) -> ApplicationResult<()> {
        let mut revoked = self.pruned()?;
        if expires_at > self.clock.now() {
            revoked.insert(session_id.to_string(), expires_at);
        }
        Ok(())
    }
}
