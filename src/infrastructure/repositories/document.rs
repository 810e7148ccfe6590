// src/infrastructure/repositories/document.rs
use crate::domain::article::{Article, ArticleId, ArticleStatus};
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JSON shape of a stored article in the search index and the warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ArticleDocument {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ArticleDocument {
    pub fn from_stored(article: &Article) -> DomainResult<Self> {
        let id = article.id.as_i64().ok_or_else(|| {
            DomainError::Persistence("cannot index an article without an id".into())
        })?;
        Ok(Self {
            id,
            title: article.title.clone(),
            content: article.content.clone(),
            status: article.status.as_str().to_string(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        })
    }
}

impl TryFrom<ArticleDocument> for Article {
    type Error = DomainError;

    fn try_from(doc: ArticleDocument) -> Result<Self, Self::Error> {
        Ok(Article::restore(
            ArticleId::new(doc.id)?,
            doc.title,
            doc.content,
            doc.status.parse::<ArticleStatus>()?,
            doc.created_at,
            doc.updated_at,
        ))
    }
}

/// Escape `%`, `_` and the escape character itself so user text matches
/// literally inside a LIKE pattern.
pub(crate) fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_metacharacters_are_escaped() {
        assert_eq!(like_pattern("Laravel"), "%Laravel%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }

    #[test]
    fn documents_require_a_valid_status() {
        let doc = ArticleDocument {
            id: 1,
            title: "t".into(),
            content: "c".into(),
            status: "archived".into(),
            created_at: None,
            updated_at: None,
        };
        assert!(Article::try_from(doc).is_err());
    }

    #[test]
    fn unsaved_articles_cannot_become_documents() {
        assert!(ArticleDocument::from_stored(&Article::create("t", "c")).is_err());
    }
}
