// src/domain/user/entity.rs
use crate::domain::user::value_objects::{PasswordHash, UserId, Username};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub password_hash: PasswordHash,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password_hash: PasswordHash,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(username: Username, password_hash: PasswordHash, created_at: DateTime<Utc>) -> Self {
        Self {
            username,
            password_hash,
            is_active: true,
            created_at,
        }
    }
}
