// src/infrastructure/security/claims.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::UserId;
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AuthenticatedUser> {
    let mut claims = Claims::default();
    for fact in facts {
        claims.apply(&fact.predicate);
    }
    claims.into_user()
}

#[derive(Default)]
struct Claims {
    user_id: Option<i64>,
    username: Option<String>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
    session_id: Option<String>,
}

impl Claims {
    fn apply(&mut self, predicate: &Predicate) {
        match (predicate.name.as_str(), predicate.terms.as_slice()) {
            ("user", [Term::Integer(id), Term::Str(name)]) => {
                self.user_id = Some(*id);
                self.username = Some(name.clone());
            }
            ("issued_at", [Term::Date(secs)]) => {
                self.issued_at = Some(UNIX_EPOCH + Duration::from_secs(*secs));
            }
            ("expires_at", [Term::Date(secs)]) => {
                self.expires_at = Some(UNIX_EPOCH + Duration::from_secs(*secs));
            }
            ("session", [Term::Str(sid)]) => {
                self.session_id = Some(sid.clone());
            }
            _ => {}
        }
    }

    fn into_user(self) -> ApplicationResult<AuthenticatedUser> {
        let user_id = self
            .user_id
            .ok_or_else(|| ApplicationError::unauthorized("missing user id"))?;
        let username = self
            .username
            .ok_or_else(|| ApplicationError::unauthorized("missing username"))?;
        let issued_at = self
            .issued_at
            .ok_or_else(|| ApplicationError::unauthorized("missing issued_at"))?;
        let expires_at = self
            .expires_at
            .ok_or_else(|| ApplicationError::unauthorized("missing expires_at"))?;

        Ok(AuthenticatedUser {
            id: UserId::new(user_id)?,
            username,
            issued_at: DateTime::<Utc>::from(issued_at),
            expires_at: DateTime::<Utc>::from(expires_at),
            session_id: self.session_id,
        })
    }
}
