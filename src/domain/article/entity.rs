// src/domain/article/entity.rs
use crate::domain::article::value_objects::{ArticleId, ArticleStatus};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    pub status: ArticleStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Article {
    /// A fresh draft that has not been stored yet.
    pub fn create(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: ArticleId::unset(),
            title: title.into(),
            content: content.into(),
            status: ArticleStatus::draft(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Rebuild an article from stored state.
    pub fn restore(
        id: ArticleId,
        title: String,
        content: String,
        status: ArticleStatus,
        created_at: Option<DateTime<Utc>>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_set()
    }

    /// Record the identity and timestamps a backend assigned on save.
    pub fn mark_stored(&mut self, id: ArticleId, now: DateTime<Utc>) {
        self.id = id;
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
        self.updated_at = Some(now);
    }
}
