//! The two fixed peer identities.
//!
//! The relay recognizes exactly two peers, wire-named `clientA` and
//! `clientB`. Any other identity string fails to parse and is rejected
//! at the protocol boundary, so the registry only ever deals with these
//! two values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// One of the two fixed peer identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeerName {
    /// The peer registered as `clientA`.
    #[serde(rename = "clientA")]
    ClientA,
    /// The peer registered as `clientB`.
    #[serde(rename = "clientB")]
    ClientB,
}

impl PeerName {
    /// Returns the counterpart identity.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::ClientA => Self::ClientB,
            Self::ClientB => Self::ClientA,
        }
    }

    /// Returns the wire name (`"clientA"` / `"clientB"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClientA => "clientA",
            Self::ClientB => "clientB",
        }
    }
}

impl fmt::Display for PeerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeerName {
    type Err = RelayError;

    /// Parses a wire peer name. Case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clientA" => Ok(Self::ClientA),
            "clientB" => Ok(Self::ClientB),
            other => Err(RelayError::UnrecognizedPeerName(other.to_string())),
        }
    }
}
