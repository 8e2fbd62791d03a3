//! Inbound wire events.
//!
//! Client-to-server frames are JSON objects tagged by an `"event"`
//! field. Frames that fail to decode — unknown event names included —
//! are ignored by the connection loop rather than answered with an
//! error, so new client events can ship before the server learns them.

use serde::Deserialize;

/// A client-to-server event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Request a slot under the given peer name.
    Register {
        /// Requested identity; `"clientA"` or `"clientB"`.
        name: String,
    },
    /// Ring the counterpart's bell.
    Ring,
    /// Latency probe; answered immediately with `pong`.
    Ping,
}
