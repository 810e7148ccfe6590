// src/infrastructure/repositories/mod.rs
mod bigquery_article;
mod document;
mod elasticsearch_article;
mod error;
mod postgres_article;
mod postgres_user;

pub use bigquery_article::BigQueryArticleRepository;
pub use elasticsearch_article::ElasticsearchArticleRepository;
pub use error::{map_reqwest, map_sqlx};
pub(crate) use error::ensure_success;
pub use postgres_article::PostgresArticleRepository;
pub use postgres_user::PostgresUserRepository;

use crate::application::ports::{ids::ArticleIdGenerator, time::Clock};
use crate::config::ArticleBackend;
use crate::domain::article::ArticleRepository;
use sqlx::PgPool;
use std::sync::Arc;

/// Pick the article store named by configuration. The Postgres pool is
/// always available because users live there regardless of backend.
pub fn build_article_repository(
    backend: &ArticleBackend,
    pool: PgPool,
    http: reqwest::Client,
    ids: Arc<dyn ArticleIdGenerator>,
    clock: Arc<dyn Clock>,
) -> Arc<dyn ArticleRepository> {
    match backend {
        ArticleBackend::Postgres => Arc::new(PostgresArticleRepository::new(pool)),
        ArticleBackend::Elasticsearch(config) => Arc::new(ElasticsearchArticleRepository::new(
            http,
            config.clone(),
            ids,
            clock,
        )),
        ArticleBackend::BigQuery(config) => Arc::new(BigQueryArticleRepository::new(
            http,
            config.clone(),
            ids,
            clock,
        )),
    }
}
