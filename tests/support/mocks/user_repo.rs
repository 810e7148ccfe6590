// tests/support/mocks/user_repo.rs
use super::security::DummyPasswordHasher;
use articles_api::domain::errors::{DomainError, DomainResult};
use articles_api::domain::user::{NewUser, PasswordHash, User, UserId, UserRepository, Username};
use async_trait::async_trait;
use std::sync::Mutex;

pub const ACTIVE_USER: &str = "alice";
pub const ACTIVE_PASSWORD: &str = "Correct-Horse-42";
pub const INACTIVE_USER: &str = "mallory";

pub struct InMemoryUserRepo {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn empty() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }

    /// `alice` (id 1, active) and `mallory` (id 2, disabled), both with
    /// [`ACTIVE_PASSWORD`].
    pub fn seeded() -> Self {
        let hash = PasswordHash::new(DummyPasswordHasher::hash_of(ACTIVE_PASSWORD)).unwrap();
        let user = |id: i64, name: &str, is_active: bool| User {
            id: UserId::new(id).unwrap(),
            username: Username::new(name).unwrap(),
            password_hash: hash.clone(),
            is_active,
            created_at: super::time::fixed_now(),
        };
        Self {
            users: Mutex::new(vec![
                user(1, ACTIVE_USER, true),
                user(2, INACTIVE_USER, false),
            ]),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(DomainError::Conflict("username already exists".into()));
        }
        let user = User {
            id: UserId::new(users.len() as i64 + 1)?,
            username: new_user.username,
            password_hash: new_user.password_hash,
            is_active: new_user.is_active,
            created_at: new_user.created_at,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| &u.username == username).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}
