// src/application/ports/events.rs
use crate::domain::article::ArticleEvent;

/// Fire-and-forget delivery of article events to in-process listeners.
pub trait ArticleEventPublisher: Send + Sync {
    fn publish(&self, event: ArticleEvent);
}
