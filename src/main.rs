//! Flowment HTTP server entry point.

use clap::Parser;
use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};
use flowment::{
    auth::TokenIssuer,
    config::ServerConfig,
    http::{AppState, router},
    task::adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    user::adapters::{memory::InMemoryUserRepository, postgres::PostgresUserRepository},
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flowment=info")),
        )
        .init();

    let config = ServerConfig::parse();
    let tokens = TokenIssuer::new(config.auth_config());
    let state = build_state(&config, tokens)?;
    info!(due_utc_offset = %config.due_utc_offset, "reading due dates at offset");

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!(address = %listener.local_addr()?, "serving http");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

fn build_state(config: &ServerConfig, tokens: TokenIssuer) -> Result<AppState, BoxError> {
    let Some(url) = config.database_url.as_deref() else {
        warn!("no database url configured; data is kept in memory");
        return Ok(AppState::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            tokens,
            config.due_utc_offset,
        ));
    };

    let pool = Pool::builder()
        .max_size(config.pool_size)
        .build(ConnectionManager::<PgConnection>::new(url))?;
    info!(pool_size = config.pool_size, "connected to postgres");

    Ok(AppState::new(
        Arc::new(PostgresTaskRepository::new(pool.clone())),
        Arc::new(PostgresUserRepository::new(pool)),
        tokens,
        config.due_utc_offset,
    ))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
}
