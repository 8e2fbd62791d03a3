//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::relay::RelayDispatcher;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Relay dispatcher; also grants access to the peer registry.
    pub relay: Arc<RelayDispatcher>,
}
