// tests/support/mocks/security.rs
use articles_api::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::{PasswordHasher, TokenManager},
};
use articles_api::domain::user::UserId;
use async_trait::async_trait;
use chrono::Duration;

/// Token accepted for user 1 without a session.
pub const TEST_TOKEN: &str = "test-token";
pub const EXPIRED_TOKEN: &str = "expired-token";

const SESSION_PREFIX: &str = "session:";

/// Plain-text "hash" so fixtures can be written by hand.
#[derive(Clone, Debug, Default)]
pub struct DummyPasswordHasher;

impl DummyPasswordHasher {
    pub fn hash_of(password: &str) -> String {
        format!("hashed:{password}")
    }
}

#[async_trait]
impl PasswordHasher for DummyPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(Self::hash_of(password))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if Self::hash_of(password) == expected_hash {
            Ok(())
        } else {
            Err(ApplicationError::unauthorized("invalid credentials"))
        }
    }
}

/// Issues `session:<user id>:<session id>` tokens and reads them back.
#[derive(Clone, Debug, Default)]
pub struct DummyTokenManager;

fn user(id: i64, username: &str, session_id: Option<String>) -> AuthenticatedUser {
    let now = super::time::fixed_now();
    AuthenticatedUser {
        id: UserId::new(id).unwrap(),
        username: username.into(),
        issued_at: now,
        expires_at: now + Duration::hours(1),
        session_id,
    }
}

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let now = super::time::fixed_now();
        let sid = subject.session_id.clone().unwrap_or_default();
        Ok(AuthTokenDto {
            token: format!(
                "{SESSION_PREFIX}{}:{}:{sid}",
                i64::from(subject.user_id),
                subject.username
            ),
            issued_at: now,
            expires_at: now + Duration::hours(1),
            expires_in: 3600,
            session_id: subject.session_id,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            TEST_TOKEN => Ok(user(1, "alice", None)),
            EXPIRED_TOKEN => Err(ApplicationError::unauthorized("expired token")),
            other => {
                let rest = other
                    .strip_prefix(SESSION_PREFIX)
                    .ok_or_else(|| ApplicationError::unauthorized("invalid token"))?;
                let mut parts = rest.splitn(3, ':');
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(id), Some(name), Some(sid)) => {
                        let id = id
                            .parse::<i64>()
                            .map_err(|_| ApplicationError::unauthorized("invalid token"))?;
                        Ok(user(id, name, Some(sid.to_string())))
                    }
                    _ => Err(ApplicationError::unauthorized("invalid token")),
                }
            }
        }
    }
}
