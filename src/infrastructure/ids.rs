// src/infrastructure/ids.rs
use crate::application::ports::ids::ArticleIdGenerator;
use crate::domain::{article::ArticleId, errors::DomainResult};
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Microsecond wall-clock ids, forced strictly increasing within the process.
#[derive(Default)]
pub struct TimestampIdGenerator {
    last: AtomicI64,
}

impl TimestampIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArticleIdGenerator for TimestampIdGenerator {
    fn next_id(&self) -> DomainResult<ArticleId> {
        let candidate = Utc::now().timestamp_micros().max(1);
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(candidate.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        ArticleId::new(candidate.max(previous.saturating_add(1)))
    }
}
