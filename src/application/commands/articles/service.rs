// src/application/commands/articles/service.rs
use std::sync::Arc;

use crate::{
    application::ports::{events::ArticleEventPublisher, time::Clock},
    domain::article::ArticleRepository,
};

pub struct ArticleCommandService {
    pub(super) repo: Arc<dyn ArticleRepository>,
    pub(super) events: Arc<dyn ArticleEventPublisher>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ArticleCommandService {
    pub fn new(
        repo: Arc<dyn ArticleRepository>,
        events: Arc<dyn ArticleEventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            events,
            clock,
        }
    }
}
