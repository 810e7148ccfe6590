// src/application/ports/ids.rs
use crate::domain::{article::ArticleId, errors::DomainResult};

/// Source of fresh article ids for backends without their own sequence.
pub trait ArticleIdGenerator: Send + Sync {
    fn next_id(&self) -> DomainResult<ArticleId>;
}
