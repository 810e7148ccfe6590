use crate::domain::article::value_objects::ArticleId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub enum ArticleEvent {
    Created {
        id: ArticleId,
        title: String,
        at: DateTime<Utc>,
    },
}
