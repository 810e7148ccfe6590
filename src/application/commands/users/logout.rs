use super::UserCommandService;
use crate::application::{dto::AuthenticatedUser, error::ApplicationResult};

impl UserCommandService {
    /// Revoke the session bound to the caller's token. Tokens without a
    /// session have nothing to revoke.
    pub async fn logout(&self, actor: &AuthenticatedUser) -> ApplicationResult<()> {
        if let Some(session_id) = &actor.session_id {
            self.session_revocation_store
                .revoke(session_id, actor.expires_at)
                .await?;
            tracing::info!(
                user_id = i64::from(actor.id),
                session_id = %session_id,
                "session revoked"
            );
        }
        Ok(())
    }
}
