//! Relay configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). The core registry and dispatcher are
//! not configurable — only the outer shell is.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::RelayError;

/// Top-level relay configuration.
///
/// Loaded once at startup via [`RelayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Directory of built single-page-app assets served at the root.
    pub static_dir: PathBuf,
}

impl RelayConfig {
    /// Loads configuration from environment variables.
    ///
    /// `LISTEN_ADDR` takes precedence; when unset, `PORT` selects the port
    /// on `0.0.0.0` (the contract most deploy targets provide). Falls back
    /// to `0.0.0.0:3000`. Calls `dotenvy::dotenv().ok()` to optionally
    /// load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Config`] if `LISTEN_ADDR` or `PORT` is set
    /// but cannot be parsed.
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok();

        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(addr) => addr
                .parse()
                .map_err(|e| RelayError::Config(format!("invalid LISTEN_ADDR `{addr}`: {e}")))?,
            Err(_) => match std::env::var("PORT") {
                Ok(port) => {
                    let port: u16 = port
                        .parse()
                        .map_err(|e| RelayError::Config(format!("invalid PORT `{port}`: {e}")))?;
                    SocketAddr::from(([0, 0, 0, 0], port))
                }
                Err(_) => SocketAddr::from(([0, 0, 0, 0], 3000)),
            },
        };

        let static_dir =
            PathBuf::from(std::env::var("STATIC_DIR").unwrap_or_else(|_| "dist".to_string()));

        Ok(Self {
            listen_addr,
            static_dir,
        })
    }
}
