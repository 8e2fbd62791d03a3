//! HTTP surface outside the WebSocket: health check and static assets.

pub mod spa;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Builds the router for the plain-HTTP endpoints.
pub fn build_router() -> Router<AppState> {
    system::routes()
}
