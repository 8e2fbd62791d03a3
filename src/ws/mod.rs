//! WebSocket layer: upgrade handling, the per-connection loop, and
//! inbound message decoding.
//!
//! The endpoint at `/ws` carries the whole signaling protocol: JSON text
//! frames tagged by an `"event"` field in both directions.

pub mod connection;
pub mod handler;
pub mod messages;
