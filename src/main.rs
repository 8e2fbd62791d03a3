//! callbell server entry point.
//!
//! Starts the Axum HTTP server with the WebSocket signaling endpoint,
//! the health endpoint, and static SPA serving.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use callbell::api;
use callbell::app_state::AppState;
use callbell::config::RelayConfig;
use callbell::domain::PeerRegistry;
use callbell::relay::RelayDispatcher;
use callbell::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = RelayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting callbell relay");

    // Build domain layer
    let registry = Arc::new(PeerRegistry::new());
    let relay = Arc::new(RelayDispatcher::new(registry));

    // Build application state
    let app_state = AppState { relay };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .fallback_service(api::spa::service(&config.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening, websocket ready");

    axum::serve(listener, app).await?;

    Ok(())
}
