// src/infrastructure/repositories/postgres_article.rs
use super::{document::like_pattern, map_sqlx};
use crate::domain::article::{Article, ArticleId, ArticleRepository, ArticleStatus};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::{Page, PageRequest};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

const ARTICLE_COLUMNS: &str = "id, title, content, status, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    content: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        Ok(Article::restore(
            ArticleId::new(row.id)?,
            row.title,
            row.content,
            row.status.parse::<ArticleStatus>()?,
            Some(row.created_at),
            Some(row.updated_at),
        ))
    }
}

impl PostgresArticleRepository {
    fn push_search_filter<'a>(builder: &mut QueryBuilder<'a, Postgres>, pattern: Option<&'a str>) {
        if let Some(pattern) = pattern {
            builder.push(" WHERE (title ILIKE ");
            builder.push_bind(pattern);
            builder.push(" ESCAPE '\\' OR content ILIKE ");
            builder.push_bind(pattern);
            builder.push(" ESCAPE '\\')");
        }
    }

    async fn fetch_page(
        &self,
        page: PageRequest,
        pattern: Option<&str>,
    ) -> DomainResult<Page<Article>> {
        let mut count: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM articles");
        Self::push_search_filter(&mut count, pattern);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut select: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM articles"));
        Self::push_search_filter(&mut select, pattern);
        select.push(" ORDER BY id LIMIT ");
        select.push_bind(i64::from(page.per_page()));
        select.push(" OFFSET ");
        select.push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

        let rows = select
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let items = rows
            .into_iter()
            .map(Article::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, u64::try_from(total).unwrap_or(0), page))
    }

    async fn insert(&self, article: &Article) -> DomainResult<ArticleRow> {
        sqlx::query_as::<_, ArticleRow>(&format!(
            "INSERT INTO articles (title, content, status)
             VALUES ($1, $2, $3)
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(&article.title)
        .bind(&article.content)
        .bind(article.status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn update(&self, id: i64, article: &Article) -> DomainResult<ArticleRow> {
        sqlx::query_as::<_, ArticleRow>(&format!(
            "UPDATE articles SET title = $1, content = $2, status = $3, updated_at = NOW()
             WHERE id = $4
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(&article.title)
        .bind(&article.content)
        .bind(article.status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("article not found".into()))
    }
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn find_all(&self, page: PageRequest) -> DomainResult<Page<Article>> {
        self.fetch_page(page, None).await
    }

    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let Some(id) = id.as_i64() else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Article::try_from).transpose()
    }

    async fn save(&self, article: &mut Article) -> DomainResult<()> {
        let row = match article.id.as_i64() {
            None => self.insert(article).await?,
            Some(id) => self.update(id, article).await?,
        };
        *article = Article::try_from(row)?;
        Ok(())
    }

    async fn search_by_title_or_content(
        &self,
        query: &str,
        page: PageRequest,
    ) -> DomainResult<Page<Article>> {
        let pattern = like_pattern(query);
        self.fetch_page(page, Some(&pattern)).await
    }
}
