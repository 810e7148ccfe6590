// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{articles::ArticleCommandService, users::UserCommandService},
        dto::AuthenticatedUser,
        error::ApplicationError,
        ports::{
            ai::AiQueryClient,
            events::ArticleEventPublisher,
            security::{PasswordHasher, TokenManager},
            session_revocation::SessionRevocationStore,
            time::Clock,
        },
        queries::{ai::AiQueryService, articles::ArticleQueryService, users::UserQueryService},
    },
    domain::{article::ArticleRepository, user::UserRepository},
};

pub struct ApplicationServices {
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub ai_queries: Arc<AiQueryService>,
    token_manager: Arc<dyn TokenManager>,
    session_revocation_store: Arc<dyn SessionRevocationStore>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        article_repo: Arc<dyn ArticleRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_manager: Arc<dyn TokenManager>,
        session_revocation_store: Arc<dyn SessionRevocationStore>,
        events: Arc<dyn ArticleEventPublisher>,
        ai_client: Arc<dyn AiQueryClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
            Arc::clone(&token_manager),
            Arc::clone(&session_revocation_store),
            Arc::clone(&clock),
        ));
        let user_queries = Arc::new(UserQueryService::new(Arc::clone(&user_repo)));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&article_repo),
            events,
            Arc::clone(&clock),
        ));
        let article_queries = Arc::new(ArticleQueryService::new(article_repo));
        let ai_queries = Arc::new(AiQueryService::new(ai_client));

        Self {
            user_commands,
            user_queries,
            article_commands,
            article_queries,
            ai_queries,
            token_manager,
            session_revocation_store,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    pub fn session_revocation_store(&self) -> Arc<dyn SessionRevocationStore> {
        Arc::clone(&self.session_revocation_store)
    }

    /// Verify a raw bearer token and reject it when its session was revoked.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let user = self.token_manager.authenticate(token).await?;
        self.ensure_session_not_revoked(&user).await?;
        Ok(user)
    }

    async fn ensure_session_not_revoked(&self, user: &AuthenticatedUser) -> ApplicationResult<()> {
        if let Some(session_id) = &user.session_id {
            if self.session_revocation_store.is_revoked(session_id).await? {
                return Err(ApplicationError::unauthorized("session revoked"));
            }
        }
        Ok(())
    }
}
