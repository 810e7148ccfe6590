// src/bin/create_user.rs
use anyhow::{Context, Result, bail};
use articles_api::application::commands::users::{RegisterUserCommand, UserCommandService};
use articles_api::config::AppConfig;
use articles_api::infrastructure::{
    database,
    repositories::PostgresUserRepository,
    security::{
        password::Argon2PasswordHasher, session_store::InMemorySessionRevocationStore,
        token::BiscuitTokenManager,
    },
    time::SystemClock,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let mut args = std::env::args().skip(1);
    let (Some(username), Some(password), None) = (args.next(), args.next(), args.next()) else {
        bail!("usage: create_user <username> <password>");
    };

    let config = AppConfig::from_env()?;
    let pool = database::init_pool(config.database_url())
        .await
        .context("connecting to the database")?;
    database::run_migrations(&pool).await?;

    let users = UserCommandService::new(
        Arc::new(PostgresUserRepository::new(pool)),
        Arc::new(Argon2PasswordHasher),
        Arc::new(BiscuitTokenManager::new(
            config.biscuit_private_key(),
            config.token_ttl(),
        )?),
        Arc::new(InMemorySessionRevocationStore::new()),
        Arc::new(SystemClock),
    );

    let user = users
        .register(RegisterUserCommand { username, password })
        .await?;
    println!("Created user '{}' with id {}.", user.username, user.id);
    Ok(())
}
