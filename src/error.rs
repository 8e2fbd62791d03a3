//! Relay error types.
//!
//! [`RelayError`] covers the fallible edges of the process: configuration
//! parsing at startup and peer-name parsing at the protocol boundary.
//! Nothing in the relay core itself reports errors — registration
//! conflicts are protocol outcomes (`registered {success: false}`), and
//! forwarding is fire-and-forget.

/// Central error type for the relay.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// A configuration variable could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A registration request named neither `clientA` nor `clientB`.
    #[error("unrecognized peer name: {0}")]
    UnrecognizedPeerName(String),
}
