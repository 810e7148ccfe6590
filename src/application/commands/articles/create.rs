// src/application/commands/articles/create.rs
use super::ArticleCommandService;
use crate::{
    application::{
        dto::ArticleDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::article::{Article, ArticleEvent},
};

pub const MAX_TITLE_LENGTH: usize = 255;

#[derive(Debug, Clone)]
pub struct CreateArticleCommand {
    pub title: String,
    pub content: String,
}

impl CreateArticleCommand {
    pub fn builder() -> CreateArticleCommandBuilder {
        CreateArticleCommandBuilder::default()
    }

    /// Input rules: both fields present and non-blank, title at most
    /// [`MAX_TITLE_LENGTH`] characters. Surrounding whitespace is dropped.
    fn validated(self) -> ApplicationResult<(String, String)> {
        let title = self.title.trim();
        let content = self.content.trim();

        if title.is_empty() {
            return Err(ApplicationError::validation("the title field is required"));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(ApplicationError::validation(format!(
                "the title must not be greater than {MAX_TITLE_LENGTH} characters"
            )));
        }
        if content.is_empty() {
            return Err(ApplicationError::validation(
                "the content field is required",
            ));
        }

        Ok((title.to_string(), content.to_string()))
    }
}

#[derive(Default)]
pub struct CreateArticleCommandBuilder {
    title: Option<String>,
    content: Option<String>,
}

impl CreateArticleCommandBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn build(self) -> Result<CreateArticleCommand, &'static str> {
        Ok(CreateArticleCommand {
            title: self.title.ok_or("title is required")?,
            content: self.content.ok_or("content is required")?,
        })
    }
}

impl ArticleCommandService {
    pub async fn create_article(
        &self,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let (title, content) = command.validated()?;

        let mut article = Article::create(title, content);
        self.repo.save(&mut article).await?;

        tracing::info!(article_id = %article.id, "article created");
        self.events.publish(ArticleEvent::Created {
            id: article.id,
            title: article.title.clone(),
            at: self.clock.now(),
        });

        Ok(article.into())
    }
}
