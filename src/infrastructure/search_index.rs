// src/infrastructure/search_index.rs
use crate::config::ElasticsearchConfig;
use crate::domain::errors::DomainResult;
use crate::infrastructure::repositories::{ensure_success, map_reqwest};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSetup {
    Created,
    AlreadyExists,
}

pub fn article_index_mappings() -> Value {
    json!({
        "mappings": {
            "properties": {
                "id": { "type": "long" },
                "title": { "type": "text" },
                "content": { "type": "text" },
                "status": { "type": "keyword" },
                "created_at": { "type": "date" },
                "updated_at": { "type": "date" },
            }
        }
    })
}

/// Create the article index with its mappings unless it is already there.
pub async fn ensure_article_index(
    client: &reqwest::Client,
    config: &ElasticsearchConfig,
) -> DomainResult<IndexSetup> {
    let url = format!("{}/{}", config.host, config.index);

    let existing = client.head(&url).send().await.map_err(map_reqwest)?;
    if existing.status().is_success() {
        return Ok(IndexSetup::AlreadyExists);
    }
    if existing.status() != StatusCode::NOT_FOUND {
        ensure_success("elasticsearch", existing).await?;
    }

    let response = client
        .put(&url)
        .json(&article_index_mappings())
        .send()
        .await
        .map_err(map_reqwest)?;
    ensure_success("elasticsearch", response).await?;

    tracing::info!(index = %config.index, "search index created");
    Ok(IndexSetup::Created)
}
