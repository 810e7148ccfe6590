// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{articles, auth},
    middleware::rate_limit::login_rate_limit_layer,
    openapi,
    responses::StatusResponse,
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Router with permissive CORS; tests switch the login limiter off.
pub fn build_router_with_rate_limiter(state: HttpState, rate_limit: bool) -> Router {
    build_router_with_options(state, rate_limit, &[])
}

/// `allowed_origins` empty means any origin.
pub fn build_router_with_options(
    state: HttpState,
    rate_limit: bool,
    allowed_origins: &[String],
) -> Router {
    let mut login = Router::new().route("/login", post(auth::login));
    if rate_limit {
        if let Some(layer) = login_rate_limit_layer() {
            login = login.layer(layer);
        }
    }

    Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi::serve_openapi))
        .merge(login)
        .route("/logout", post(auth::logout))
        .route("/user", get(auth::profile))
        .route(
            "/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route("/articles/search", post(articles::search_articles))
        .route("/articles/ask-ai", post(articles::ask_ai))
        .route("/articles/{id}", get(articles::get_article))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    security(()),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
