use crate::application::ApplicationResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait SessionRevocationStore: Send + Sync {
    /// Return true if the given session id has been revoked.
    async fn is_revoked(&self, session_id: &str) -> ApplicationResult<bool>;

    /// Revoke the given session id (e.g. on logout). The revocation only has
    /// to outlive `expires_at`, after which the token fails its own checks.
    async fn revoke(&self, session_id: &str, expires_at: DateTime<Utc>) -> ApplicationResult<()>;
}
