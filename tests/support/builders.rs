// tests/support/builders.rs
use articles_api::domain::article::{Article, ArticleId, ArticleStatus};
use chrono::Utc;

pub struct ArticleBuilder {
    id: Option<i64>,
    title: String,
    content: String,
    status: ArticleStatus,
}

impl ArticleBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            title: "Test Article".into(),
            content: "body text".into(),
            status: ArticleStatus::draft(),
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn published(mut self) -> Self {
        self.status = ArticleStatus::published();
        self
    }

    pub fn build(self) -> Article {
        let stamp = self.id.map(|_| Utc::now());
        Article::restore(
            ArticleId::from_option(self.id).unwrap(),
            self.title,
            self.content,
            self.status,
            stamp,
            stamp,
        )
    }
}
