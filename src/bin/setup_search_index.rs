// src/bin/setup_search_index.rs
use anyhow::{Result, bail};
use articles_api::config::ArticleBackend;
use articles_api::infrastructure::search_index::{IndexSetup, ensure_article_index};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
        .init();

    let backend = ArticleBackend::from_env()?;
    let ArticleBackend::Elasticsearch(es) = &backend else {
        bail!(
            "article backend is '{}'; set ARTICLE_BACKEND=elasticsearch to set up the search index",
            backend.name()
        );
    };

    match ensure_article_index(&reqwest::Client::new(), es).await? {
        IndexSetup::Created => println!("Index '{}' created.", es.index),
        IndexSetup::AlreadyExists => println!("Index '{}' already exists.", es.index),
    }
    Ok(())
}
