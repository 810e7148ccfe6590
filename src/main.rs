use anyhow::Result;
use articles_api::application::{
    ports::{
        ai::AiQueryClient,
        events::ArticleEventPublisher,
        ids::ArticleIdGenerator,
        security::{PasswordHasher, TokenManager},
        session_revocation::SessionRevocationStore,
        time::Clock,
    },
    services::ApplicationServices,
};
use articles_api::config::AppConfig;
use articles_api::domain::user::UserRepository;
use articles_api::infrastructure::{
    ai_client::HttpAiQueryClient,
    database,
    events::{BroadcastEventPublisher, spawn_event_logger},
    ids::TimestampIdGenerator,
    repositories::{PostgresUserRepository, build_article_repository},
    security::{
        password::Argon2PasswordHasher, session_store::InMemorySessionRevocationStore,
        token::BiscuitTokenManager,
    },
    time::SystemClock,
};
use articles_api::presentation::http::{routes::build_router_with_options, state::HttpState};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    tracing::info!(backend = config.article_backend().name(), "article backend selected");

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let http = reqwest::Client::new();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let ids: Arc<dyn ArticleIdGenerator> = Arc::new(TimestampIdGenerator::new());

    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let article_repo = build_article_repository(
        config.article_backend(),
        pool,
        http,
        ids,
        Arc::clone(&clock),
    );

    let publisher = BroadcastEventPublisher::new(EVENT_CHANNEL_CAPACITY);
    let _event_logger = spawn_event_logger(publisher.subscribe());
    let events: Arc<dyn ArticleEventPublisher> = Arc::new(publisher);

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let token_manager: Arc<dyn TokenManager> = Arc::new(BiscuitTokenManager::new(
        config.biscuit_private_key(),
        config.token_ttl(),
    )?);
    let session_store: Arc<dyn SessionRevocationStore> =
        Arc::new(InMemorySessionRevocationStore::with_clock(Arc::clone(&clock)));
    let ai_client: Arc<dyn AiQueryClient> = Arc::new(HttpAiQueryClient::new(
        config.ai_service_url(),
        config.ai_service_timeout(),
    )?);

    let services = Arc::new(ApplicationServices::new(
        user_repo,
        article_repo,
        password_hasher,
        token_manager,
        session_store,
        events,
        ai_client,
        clock,
    ));

    let state = HttpState { services };
    let app = build_router_with_options(
        state,
        config.login_rate_limit(),
        config.allowed_origins(),
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    // Peer addresses feed the per-IP login limiter.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
