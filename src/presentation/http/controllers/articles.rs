// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::CreateArticleCommand,
    queries::{
        ai::AskAiQuery,
        articles::{GetArticleByIdQuery, ListArticlesQuery, SearchArticlesQuery},
    },
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::responses::{ArticleCollectionResponse, ArticleResponse};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number; defaults to 1.
    #[serde(default)]
    pub page: Option<u32>,
}

impl PageParams {
    fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

// Missing fields deserialize as empty strings so they reach validation
// and come back as 400 instead of a JSON rejection.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchArticlesRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AskAiRequest {
    #[serde(default)]
    pub prompt: String,
}

#[utoipa::path(
    get,
    path = "/articles",
    params(PageParams),
    responses(
        (
            status = 200,
            description = "One page of articles ordered by id.",
            body = ArticleCollectionResponse
        ),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
    Query(params): Query<PageParams>,
) -> HttpResult<Json<ArticleCollectionResponse>> {
    state
        .services
        .article_queries
        .list_articles(ListArticlesQuery {
            page: params.page(),
        })
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

#[utoipa::path(
    post,
    path = "/articles",
    request_body = CreateArticleRequest,
    responses(
        (status = 201, description = "Article stored as a draft.", body = ArticleResponse),
        (status = 400, description = "Invalid input.", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateArticleRequest>,
) -> HttpResult<(StatusCode, Json<ArticleResponse>)> {
    let command = CreateArticleCommand {
        title: payload.title,
        content: payload.content,
    };

    let article = state
        .services
        .article_commands
        .create_article(command)
        .await
        .into_http()?;

    tracing::debug!(user_id = i64::from(user.id), "article created via http");
    Ok((StatusCode::CREATED, Json(article.into())))
}

#[utoipa::path(
    get,
    path = "/articles/{id}",
    params(("id" = String, Path, description = "Article id")),
    responses(
        (status = 200, description = "The article.", body = ArticleResponse),
        (status = 400, description = "Malformed id.", body = ErrorResponse),
        (status = 404, description = "No article with that id.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn get_article(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
    Path(id): Path<String>,
) -> HttpResult<Json<ArticleResponse>> {
    state
        .services
        .article_queries
        .get_article_by_id(GetArticleByIdQuery { id })
        .await
        .into_http()
        .map(|article| Json(article.into()))
}

#[utoipa::path(
    post,
    path = "/articles/search",
    params(PageParams),
    request_body = SearchArticlesRequest,
    responses(
        (
            status = 200,
            description = "Articles whose title or content match.",
            body = ArticleCollectionResponse
        ),
        (status = 401, description = "Missing or invalid token.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn search_articles(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
    Query(params): Query<PageParams>,
    Json(payload): Json<SearchArticlesRequest>,
) -> HttpResult<Json<ArticleCollectionResponse>> {
    state
        .services
        .article_queries
        .search_articles(SearchArticlesQuery {
            query: payload.query,
            page: params.page(),
        })
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

#[utoipa::path(
    post,
    path = "/articles/ask-ai",
    request_body = AskAiRequest,
    responses(
        (status = 200, description = "The AI service's JSON answer, unchanged.", body = Object),
        (status = 400, description = "Missing prompt.", body = ErrorResponse),
        (
            status = 500,
            description = "AI service unavailable; body is \
                {\"error\": \"Failed to get response from AI service\"}."
        )
    ),
    security(("bearerAuth" = [])),
    tag = "Articles"
)]
pub async fn ask_ai(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
    Json(payload): Json<AskAiRequest>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .ai_queries
        .ask(AskAiQuery {
            prompt: payload.prompt,
        })
        .await
        .into_http()
        .map(Json)
}
