//! # callbell
//!
//! Two-party WebSocket signaling relay. Exactly two named peers —
//! `clientA` and `clientB` — register into fixed slots and exchange a
//! small set of control events: `ring` is forwarded to the counterpart
//! as `bell-rung`, `ping` is answered locally with `pong`.
//!
//! ## Architecture
//!
//! ```text
//! Clients (WebSocket, HTTP)
//!     │
//!     ├── WS Handler (ws/)
//!     ├── Health + SPA assets (api/)
//!     │
//!     ├── RelayDispatcher (relay/)
//!     │
//!     └── PeerRegistry (domain/)
//! ```
//!
//! The registry owns the two slots behind a single lock; the dispatcher
//! resolves the counterpart for directed forwarding. Forwarding is
//! fire-and-forget: a ring with no registered counterpart is dropped
//! without feedback to the ringer.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod relay;
pub mod ws;
