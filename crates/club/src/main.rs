use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use club::services::{spawn_game_refresh_service, spawn_midnight_service};
use club::AppState;
use infra::DocumentStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let store = DocumentStore::new();
    let state = AppState::new(store)?;

    state.initialize().await?;
    tracing::info!("Session data loaded");

    // Start the background midnight rollover for today-scoped data
    let _midnight_handle = spawn_midnight_service(state.clone());
    tracing::info!("Midnight rollover service started");

    // Start the background refresh that keeps the live board reconciled
    let _refresh_handle = spawn_game_refresh_service(state.clone());
    tracing::info!("Game board refresh service started");

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    Ok(())
}
