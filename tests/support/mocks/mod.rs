// tests/support/mocks/mod.rs
pub mod ai;
pub mod article_repo;
pub mod events;
pub mod security;
pub mod time;
pub mod user_repo;

pub use ai::StubAiClient;
pub use article_repo::InMemoryArticleRepo;
pub use events::RecordingEventPublisher;
pub use security::{DummyPasswordHasher, DummyTokenManager, EXPIRED_TOKEN, TEST_TOKEN};
pub use time::{DummyClock, fixed_now};
pub use user_repo::{ACTIVE_PASSWORD, ACTIVE_USER, INACTIVE_USER, InMemoryUserRepo};
