use crate::domain::article::Article;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    /// `draft` or `published`.
    pub status: String,
    #[serde(default, with = "serde_time::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "serde_time::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Article> for ArticleDto {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.as_i64(),
            status: article.status.as_str().to_string(),
            title: article.title,
            content: article.content,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}
