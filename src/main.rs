use std::sync::Arc;

use inventory_api::app::{app, AppState};
use inventory_api::database::manager::DatabaseManager;
use inventory_api::services::upstream::HttpUpstream;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, BACKEND_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = inventory_api::config::config();
    tracing::info!("Starting Inventory API in {:?} mode", config.environment);

    // Apply migrations when the store is reachable; the server still comes up
    // degraded (visible via /health) when it is not.
    if let Err(e) = DatabaseManager::migrate().await {
        tracing::warn!("Skipping migrations: {}", e);
    }

    let state = AppState {
        upstream: Arc::new(HttpUpstream::from_config()),
    };
    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("INVENTORY_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Inventory API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
