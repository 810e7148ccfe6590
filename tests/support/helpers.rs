// tests/support/helpers.rs
use super::mocks::{
    DummyClock, DummyPasswordHasher, DummyTokenManager, InMemoryArticleRepo, InMemoryUserRepo,
    RecordingEventPublisher, StubAiClient,
};
use articles_api::application::{ports::ai::AiQueryClient, services::ApplicationServices};
use articles_api::infrastructure::security::session_store::InMemorySessionRevocationStore;
use articles_api::presentation::http::{
    routes::build_router_with_rate_limiter, state::HttpState,
};
use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::util::ServiceExt;

/// Router plus handles on the fakes behind it.
pub struct TestApp {
    pub router: Router,
    pub articles: Arc<InMemoryArticleRepo>,
    pub events: Arc<RecordingEventPublisher>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_ai(Arc::new(StubAiClient::Answer(json!({ "answer": "ok" }))))
    }

    pub fn with_ai(ai: Arc<dyn AiQueryClient>) -> Self {
        Self::build(Arc::new(InMemoryArticleRepo::new()), ai)
    }

    pub fn with_articles(articles: Arc<InMemoryArticleRepo>) -> Self {
        Self::build(
            articles,
            Arc::new(StubAiClient::Answer(json!({ "answer": "ok" }))),
        )
    }

    fn build(articles: Arc<InMemoryArticleRepo>, ai: Arc<dyn AiQueryClient>) -> Self {
        let events = Arc::new(RecordingEventPublisher::default());
        let services = ApplicationServices::new(
            Arc::new(InMemoryUserRepo::seeded()),
            articles.clone(),
            Arc::new(DummyPasswordHasher),
            Arc::new(DummyTokenManager),
            Arc::new(InMemorySessionRevocationStore::with_clock(Arc::new(DummyClock))),
            events.clone(),
            ai,
            Arc::new(DummyClock),
        );
        let state = HttpState {
            services: Arc::new(services),
        };
        Self {
            router: build_router_with_rate_limiter(state, false),
            articles,
            events,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn make_test_router() -> Router {
    TestApp::new().router
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn read_json(resp: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Status, JSON content type, canonical `error` reason and a non-empty `message`.
pub async fn assert_error_response(
    resp: Response<Body>,
    expected_status: StatusCode,
    expected_error: &str,
) -> Value {
    assert_eq!(resp.status(), expected_status);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "unexpected content type {content_type}"
    );

    let body = read_json(resp).await;
    assert_eq!(body["error"], expected_error);
    assert!(
        body["message"].as_str().is_some_and(|m| !m.is_empty()),
        "missing message in {body}"
    );
    body
}
