// src/infrastructure/repositories/bigquery_article.rs
use super::{
    document::{ArticleDocument, like_pattern},
    error::{ensure_success, map_reqwest},
};
use crate::application::ports::{ids::ArticleIdGenerator, time::Clock};
use crate::config::BigQueryConfig;
use crate::domain::article::{Article, ArticleId, ArticleRepository, ArticleStatus};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::pagination::{Page, PageRequest};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

const BACKEND: &str = "bigquery";
const TABLE: &str = "articles";
const SELECT_COLUMNS: &str = "id, title, content, status, created_at, updated_at";

static NULL_CELL: Value = Value::Null;

/// Append-only article table in a BigQuery dataset, driven through the
/// jobs.query and tabledata.insertAll REST endpoints. Saving an article that
/// already has an id appends a newer row for it; reads take the latest row.
pub struct BigQueryArticleRepository {
    client: reqwest::Client,
    config: BigQueryConfig,
    ids: Arc<dyn ArticleIdGenerator>,
    clock: Arc<dyn Clock>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponse {
    #[serde(default)]
    job_complete: bool,
    schema: Option<Schema>,
    #[serde(default)]
    rows: Vec<Row>,
}

#[derive(Debug, Deserialize)]
struct Schema {
    fields: Vec<Field>,
}

#[derive(Debug, Deserialize)]
struct Field {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Row {
    f: Vec<Cell>,
}

#[derive(Debug, Deserialize)]
struct Cell {
    v: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertAllResponse {
    #[serde(default)]
    insert_errors: Vec<Value>,
}

struct QueryParam {
    name: &'static str,
    kind: &'static str,
    value: String,
}

impl QueryParam {
    fn int64(name: &'static str, value: impl ToString) -> Self {
        Self {
            name,
            kind: "INT64",
            value: value.to_string(),
        }
    }

    fn string(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            kind: "STRING",
            value: value.into(),
        }
    }

    fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "parameterType": { "type": self.kind },
            "parameterValue": { "value": self.value },
        })
    }
}

impl BigQueryArticleRepository {
    pub fn new(
        client: reqwest::Client,
        config: BigQueryConfig,
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

    fn table(&self) -> String {
        format!(
            "`{}.{}.{}`",
            self.config.project_id, self.config.dataset_id, TABLE
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn run_query(&self, sql: String, params: &[QueryParam]) -> DomainResult<QueryResponse> {
        let url = format!(
            "{}/projects/{}/queries",
            self.config.api_base, self.config.project_id
        );
        let body = json!({
            "query": sql,
            "useLegacySql": false,
            "parameterMode": "NAMED",
            "queryParameters": params.iter().map(QueryParam::to_json).collect::<Vec<_>>(),
        });

        let response = self
            .authorized(self.client.post(url))
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest)?;
        let parsed: QueryResponse = ensure_success(BACKEND, response)
            .await?
            .json()
            .await
            .map_err(map_reqwest)?;

        if !parsed.job_complete {
            return Err(DomainError::Persistence(
                "bigquery query did not complete in time".into(),
            ));
        }
        Ok(parsed)
    }

    async fn count(&self, filter: &str, params: &[QueryParam]) -> DomainResult<u64> {
        let sql = count_sql(&self.table(), filter);
        let response = self.run_query(sql, params).await?;
        let cell = response
            .rows
            .first()
            .and_then(|row| row.f.first())
            .map(|cell| &cell.v)
            .ok_or_else(|| DomainError::Persistence("bigquery count returned no rows".into()))?;
        cell_i64(cell)
            .and_then(|n| u64::try_from(n).ok())
            .ok_or_else(|| DomainError::Persistence("bigquery count is not a number".into()))
    }

    /// Rows whose latest version matches `filter`, ordered by id.
    async fn fetch_page(
        &self,
        filter: &str,
        mut params: Vec<QueryParam>,
        page: PageRequest,
    ) -> DomainResult<Page<Article>> {
        let total = self.count(filter, &params).await?;

        let sql = page_sql(&self.table(), filter);
        params.push(QueryParam::int64("limit", page.per_page()));
        params.push(QueryParam::int64("offset", page.offset()));

        let response = self.run_query(sql, &params).await?;
        let items = decode_articles(response)?;
        Ok(Page::new(items, total, page))
    }
}

#[async_trait]
impl ArticleRepository for BigQueryArticleRepository {
    async fn find_all(&self, page: PageRequest) -> DomainResult<Page<Article>> {
        self.fetch_page("", Vec::new(), page).await
    }

    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let Some(id) = id.as_i64() else {
            return Ok(None);
        };

        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM {} WHERE id = @id ORDER BY updated_at DESC LIMIT 1",
            self.table()
        );
        let response = self.run_query(sql, &[QueryParam::int64("id", id)]).await?;
        Ok(decode_articles(response)?.into_iter().next())
    }

    async fn save(&self, article: &mut Article) -> DomainResult<()> {
        let id = match article.id.as_i64() {
            Some(_) => article.id,
            None => self.ids.next_id()?,
        };

        let mut stored = article.clone();
        stored.mark_stored(id, self.clock.now());
        let doc = ArticleDocument::from_stored(&stored)?;
        let insert_id = format!(
            "{}-{}",
            doc.id,
            doc.updated_at.map(|t| t.timestamp_micros()).unwrap_or_default()
        );

        let url = format!(
            "{}/projects/{}/datasets/{}/tables/{TABLE}/insertAll",
            self.config.api_base, self.config.project_id, self.config.dataset_id
        );
        let response = self
            .authorized(self.client.post(url))
            .json(&json!({ "rows": [{ "insertId": insert_id, "json": doc }] }))
            .send()
            .await
            .map_err(map_reqwest)?;
        let parsed: InsertAllResponse = ensure_success(BACKEND, response)
            .await?
            .json()
            .await
            .map_err(map_reqwest)?;

        if !parsed.insert_errors.is_empty() {
            return Err(DomainError::Persistence(format!(
                "bigquery rejected the row: {}",
                Value::Array(parsed.insert_errors)
            )));
        }

        *article = stored;
        Ok(())
    }

    async fn search_by_title_or_content(
        &self,
        query: &str,
        page: PageRequest,
    ) -> DomainResult<Page<Article>> {
        self.fetch_page(
            " WHERE (title LIKE @pattern OR content LIKE @pattern)",
            vec![QueryParam::string("pattern", like_pattern(query))],
            page,
        )
        .await
    }
}

/// The table is append-only: every save adds a row, and only the newest row
/// of each id is the article. Filters apply to that row alone.
fn latest_versions(table: &str) -> String {
    format!(
        "(SELECT {SELECT_COLUMNS} FROM {table} WHERE TRUE \
         QUALIFY ROW_NUMBER() OVER (PARTITION BY id ORDER BY updated_at DESC) = 1)"
    )
}

fn count_sql(table: &str, filter: &str) -> String {
    format!("SELECT COUNT(*) AS total FROM {}{filter}", latest_versions(table))
}

fn page_sql(table: &str, filter: &str) -> String {
    format!(
        "SELECT {SELECT_COLUMNS} FROM {}{filter} ORDER BY id LIMIT @limit OFFSET @offset",
        latest_versions(table)
    )
}

fn decode_articles(response: QueryResponse) -> DomainResult<Vec<Article>> {
    let Some(schema) = response.schema else {
        return Ok(Vec::new());
    };
    let column = |name: &str| {
        schema
            .fields
            .iter()
            .position(|field| field.name == name)
            .ok_or_else(|| DomainError::Persistence(format!("bigquery result lacks column {name}")))
    };
    let (id, title, content, status, created_at, updated_at) = (
        column("id")?,
        column("title")?,
        column("content")?,
        column("status")?,
        column("created_at")?,
        column("updated_at")?,
    );

    response
        .rows
        .iter()
        .map(|row| {
            let cell = |idx: usize| row.f.get(idx).map(|c| &c.v).unwrap_or(&NULL_CELL);
            let raw_id = cell_i64(cell(id))
                .ok_or_else(|| DomainError::Persistence("bigquery row has no id".into()))?;
            Ok(Article::restore(
                ArticleId::new(raw_id)?,
                cell_string(cell(title)),
                cell_string(cell(content)),
                cell_string(cell(status)).parse::<ArticleStatus>()?,
                cell_timestamp(cell(created_at)),
                cell_timestamp(cell(updated_at)),
            ))
        })
        .collect()
}

fn cell_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn cell_i64(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

/// TIMESTAMP cells come back as fractional epoch seconds in a string;
/// RFC 3339 text is accepted too.
fn cell_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let text = match value {
        Value::String(s) => s.as_str(),
        Value::Number(n) => return n.as_f64().and_then(from_epoch_seconds),
        _ => return None,
    };
    text.parse::<f64>()
        .ok()
        .and_then(from_epoch_seconds)
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|t| t.with_timezone(&Utc))
        })
}

fn from_epoch_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let micros = (secs * 1_000_000.0).round() as i64;
    DateTime::from_timestamp_micros(micros)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use httpmock::prelude::*;

    struct FixedIds(i64);

    impl ArticleIdGenerator for FixedIds {
        fn next_id(&self) -> DomainResult<ArticleId> {
            ArticleId::new(self.0)
        }
    }

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()
        }
    }

    fn repo(server: &MockServer) -> BigQueryArticleRepository {
        BigQueryArticleRepository::new(
            reqwest::Client::new(),
            BigQueryConfig {
                project_id: "proj".into(),
                dataset_id: "ds".into(),
                access_token: Some("secret".into()),
                api_base: server.base_url(),
            },
            Arc::new(FixedIds(77)),
            Arc::new(FixedClock),
        )
    }

    fn schema() -> Value {
        json!({ "fields": [
            { "name": "id", "type": "INTEGER" },
            { "name": "title", "type": "STRING" },
            { "name": "content", "type": "STRING" },
            { "name": "status", "type": "STRING" },
            { "name": "created_at", "type": "TIMESTAMP" },
            { "name": "updated_at", "type": "TIMESTAMP" },
        ]})
    }

    fn row(id: i64, title: &str) -> Value {
        json!({ "f": [
            { "v": id.to_string() },
            { "v": title },
            { "v": "body" },
            { "v": "published" },
            { "v": "1.7E9" },
            { "v": "1700000000.5" },
        ]})
    }

    #[test]
    fn timestamps_decode_from_epoch_text_or_rfc3339() {
        let t = cell_timestamp(&json!("1700000000.5")).unwrap();
        assert_eq!(t.timestamp(), 1_700_000_000);
        assert_eq!(t.timestamp_subsec_millis(), 500);
        assert_eq!(
            cell_timestamp(&json!("2024-01-02T03:04:05Z")).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
        );
        assert!(cell_timestamp(&Value::Null).is_none());
    }

    #[test]
    fn filters_apply_to_the_latest_version_only() {
        let filter = " WHERE (title LIKE @pattern OR content LIKE @pattern)";
        let dedupe = "QUALIFY ROW_NUMBER() OVER (PARTITION BY id ORDER BY updated_at DESC) = 1)";

        for sql in [count_sql("`p.d.articles`", filter), page_sql("`p.d.articles`", filter)] {
            let dedupe_at = sql.find(dedupe).unwrap();
            let filter_at = sql.find(filter).unwrap();
            assert!(dedupe_at < filter_at, "filter runs before dedupe: {sql}");
            assert!(sql.contains("FROM (SELECT id, title, content, status"));
        }

        let page = page_sql("`p.d.articles`", "");
        assert!(page.ends_with(") ORDER BY id LIMIT @limit OFFSET @offset"));
    }

    #[tokio::test]
    async fn search_counts_then_selects_with_a_like_pattern() {
        let server = MockServer::start_async().await;
        let count = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/projects/proj/queries")
                    .header("authorization", "Bearer secret")
                    .body_contains("SELECT COUNT(*) AS total FROM (SELECT")
                    .body_contains("%Laravel%");
                then.status(200).json_body(json!({
                    "jobComplete": true,
                    "schema": { "fields": [{ "name": "total", "type": "INTEGER" }] },
                    "rows": [{ "f": [{ "v": "1" }] }]
                }));
            })
            .await;
        let select = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/projects/proj/queries")
                    .body_contains("ORDER BY id LIMIT @limit OFFSET @offset")
                    .body_contains("%Laravel%");
                then.status(200).json_body(json!({
                    "jobComplete": true,
                    "schema": schema(),
                    "rows": [row(1, "Laravel Framework")]
                }));
            })
            .await;

        let page = repo(&server)
            .search_by_title_or_content("Laravel", PageRequest::first())
            .await
            .unwrap();

        count.assert_async().await;
        select.assert_async().await;
        assert_eq!(page.total, 1);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Laravel Framework");
        assert!(page.items[0].status.is_published());
    }

    #[tokio::test]
    async fn find_by_id_without_rows_is_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/projects/proj/queries");
                then.status(200)
                    .json_body(json!({ "jobComplete": true, "schema": schema() }));
            })
            .await;

        let found = repo(&server)
            .find_by_id(ArticleId::new(5).unwrap())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn incomplete_jobs_are_persistence_errors() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/projects/proj/queries");
                then.status(200).json_body(json!({ "jobComplete": false }));
            })
            .await;

        let err = repo(&server)
            .find_all(PageRequest::first())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
    }

    #[tokio::test]
    async fn save_streams_a_row_with_a_generated_id() {
        let server = MockServer::start_async().await;
        let insert = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/projects/proj/datasets/ds/tables/articles/insertAll")
                    .body_contains(r#""id":77"#)
                    .body_contains(r#""status":"draft""#);
                then.status(200)
                    .json_body(json!({ "kind": "bigquery#tableDataInsertAllResponse" }));
            })
            .await;

        let mut article = Article::create("Test Article", "body text");
        repo(&server).save(&mut article).await.unwrap();

        insert.assert_async().await;
        assert_eq!(article.id.as_i64(), Some(77));
        assert_eq!(article.created_at, Some(FixedClock.now()));
    }

    #[tokio::test]
    async fn rejected_rows_are_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/projects/proj/datasets/ds/tables/articles/insertAll");
                then.status(200).json_body(json!({
                    "insertErrors": [{ "index": 0, "errors": [{ "reason": "invalid" }] }]
                }));
            })
            .await;

        let mut article = Article::create("t", "c");
        let err = repo(&server).save(&mut article).await.unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
        assert!(!article.is_persisted());
    }
}
