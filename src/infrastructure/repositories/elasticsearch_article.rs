// src/infrastructure/repositories/elasticsearch_article.rs
use super::{
    document::ArticleDocument,
    error::{ensure_success, map_reqwest},
};
use crate::application::ports::{ids::ArticleIdGenerator, time::Clock};
use crate::config::ElasticsearchConfig;
use crate::domain::article::{Article, ArticleId, ArticleRepository};
use crate::domain::errors::DomainResult;
use crate::domain::pagination::{Page, PageRequest};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

const BACKEND: &str = "elasticsearch";
const MAX_RESULT_WINDOW: u64 = 10_000;

/// Articles stored as documents keyed by article id in a single index.
pub struct ElasticsearchArticleRepository {
    client: reqwest::Client,
    config: ElasticsearchConfig,
    ids: Arc<dyn ArticleIdGenerator>,
    clock: Arc<dyn Clock>,
}

#[derive(Deserialize)]
struct SearchResponse {
    hits: Hits,
}

#[derive(Deserialize)]
struct Hits {
    total: TotalHits,
    hits: Vec<Hit>,
}

#[derive(Deserialize)]
struct TotalHits {
    value: u64,
}

#[derive(Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: ArticleDocument,
}

#[derive(Deserialize)]
struct GetResponse {
    found: bool,
    #[serde(rename = "_source")]
    source: Option<ArticleDocument>,
}

impl ElasticsearchArticleRepository {
    pub fn new(
        client: reqwest::Client,
        config: ElasticsearchConfig,
        ids: Arc<dyn ArticleIdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            client,
            config,
            ids,
            clock,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.config.host, self.config.index, path)
    }

    async fn search(
        &self,
        query: Value,
        sort: Option<Value>,
        page: PageRequest,
    ) -> DomainResult<Page<Article>> {
        // Windows ending past `index.max_result_window` are rejected by the
        // server and cannot be paged by offset; those pages come back empty.
        let beyond_window = page.offset() + u64::from(page.per_page()) > MAX_RESULT_WINDOW;
        let (from, size) = if beyond_window {
            (0, 0)
        } else {
            (page.offset(), u64::from(page.per_page()))
        };

        let mut body = json!({
            "from": from,
            "size": size,
            "track_total_hits": true,
            "query": query,
        });
        if let Some(sort) = sort {
            body["sort"] = sort;
        }

        let response = self
            .client
            .post(self.url("_search"))
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest)?;
        let parsed: SearchResponse = ensure_success(BACKEND, response)
            .await?
            .json()
            .await
            .map_err(map_reqwest)?;

        if beyond_window {
            return Ok(Page::new(Vec::new(), parsed.hits.total.value, page));
        }

        let items = parsed
            .hits
            .hits
            .into_iter()
            .map(|hit| Article::try_from(hit.source))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, parsed.hits.total.value, page))
    }
}

#[async_trait]
impl ArticleRepository for ElasticsearchArticleRepository {
    async fn find_all(&self, page: PageRequest) -> DomainResult<Page<Article>> {
        self.search(
            json!({ "match_all": {} }),
            Some(json!([{ "id": "asc" }])),
            page,
        )
        .await
    }

    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let Some(id) = id.as_i64() else {
            return Ok(None);
        };

        let response = self
            .client
            .get(self.url(&format!("_doc/{id}")))
            .send()
            .await
            .map_err(map_reqwest)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let parsed: GetResponse = ensure_success(BACKEND, response)
            .await?
            .json()
            .await
            .map_err(map_reqwest)?;
        match (parsed.found, parsed.source) {
            (true, Some(doc)) => Article::try_from(doc).map(Some),
            _ => Ok(None),
        }
    }

    async fn save(&self, article: &mut Article) -> DomainResult<()> {
        let id = match article.id.as_i64() {
            Some(_) => article.id,
            None => self.ids.next_id()?,
        };

        let mut stored = article.clone();
        stored.mark_stored(id, self.clock.now());
        let doc = ArticleDocument::from_stored(&stored)?;

        let response = self
            .client
            .put(self.url(&format!("_doc/{}", doc.id)))
            .query(&[("refresh", "wait_for")])
            .json(&doc)
            .send()
            .await
            .map_err(map_reqwest)?;
        ensure_success(BACKEND, response).await?;

        *article = stored;
        Ok(())
    }

    async fn search_by_title_or_content(
        &self,
        query: &str,
        page: PageRequest,
    ) -> DomainResult<Page<Article>> {
        self.search(
            json!({
                "multi_match": {
                    "query": query,
                    "fields": ["title", "content"],
                }
            }),
            None,
            page,
        )
        .await
    }
}
