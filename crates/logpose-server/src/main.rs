//! logpose-server: standalone REST server for the Log Pose game.
//!
//! See [`logpose_server::config`] for the environment variables it reads.

use anyhow::Context;
use logpose_server::config::ServerConfig;
use logpose_server::router::build_router;
use logpose_server::build_store;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,logpose_server=debug".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let store = build_store(&config)?;

    let current = store.current().await?;
    tracing::info!(
        "Active waypoint: {} ({}/{})",
        current.location.name,
        current.index + 1,
        current.total
    );

    let app = build_router(store, config.admin_secret.clone());

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    tracing::info!("logpose-server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
