// src/presentation/http/openapi.rs
use std::{env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa::{Modify, OpenApi};

pub const DEFAULT_SNAPSHOT_PATH: &str = "spec/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::auth::login,
        crate::presentation::http::controllers::auth::logout,
        crate::presentation::http::controllers::auth::profile,
        crate::presentation::http::controllers::articles::list_articles,
        crate::presentation::http::controllers::articles::create_article,
        crate::presentation::http::controllers::articles::get_article,
        crate::presentation::http::controllers::articles::search_articles,
        crate::presentation::http::controllers::articles::ask_ai,
        super::routes::health
    ),
    components(
        schemas(
            crate::presentation::http::responses::StatusResponse,
            crate::presentation::http::responses::ArticleResponse,
            crate::presentation::http::responses::ArticleCollectionResponse,
            crate::presentation::http::responses::PageMeta,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::auth::LoginRequest,
            crate::presentation::http::controllers::auth::LoginResponse,
            crate::presentation::http::controllers::articles::CreateArticleRequest,
            crate::presentation::http::controllers::articles::SearchArticlesRequest,
            crate::presentation::http::controllers::articles::AskAiRequest,
            crate::application::dto::ArticleDto,
            crate::application::dto::AuthTokenDto,
            crate::application::dto::UserDto,
            crate::application::dto::UserProfileDto
        )
    ),
    tags(
        (name = "Auth", description = "Login, logout and the current user"),
        (name = "Articles", description = "Article listing, creation, search and the AI proxy"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Articles API",
        description = "Article CRUD over a PostgreSQL, Elasticsearch or BigQuery backend",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));
    }
}

pub async fn serve_openapi() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

/// Write the document as pretty JSON to `OPENAPI_SNAPSHOT_PATH`, or
/// [`DEFAULT_SNAPSHOT_PATH`] when unset. Returns the path written.
pub fn write_openapi_snapshot() -> std::io::Result<String> {
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &ApiDoc::openapi())?;
    Ok(output_path)
}
