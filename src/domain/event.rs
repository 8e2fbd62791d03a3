//! Outbound wire events.
//!
//! Every server-to-client message is a [`ServerEvent`], serialized as a
//! JSON object tagged by an `"event"` field. Delivery is fire-and-forget:
//! events queued for a connection that has already closed are dropped.

use serde::{Deserialize, Serialize};

use super::PeerName;

/// Rejection message sent when a slot is taken or the name is unknown.
const REJECTION_MESSAGE: &str = "Client name already taken or invalid";

/// A server-to-client event.
///
/// Wire shapes:
///
/// ```json
/// {"event":"registered","name":"clientA","success":true}
/// {"event":"registered","success":false,"message":"Client name already taken or invalid"}
/// {"event":"bell-rung"}
/// {"event":"pong"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Outcome of a `register` request, sent to the requester only.
    Registered {
        /// Granted identity; present only on success.
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<PeerName>,
        /// Whether the slot was granted.
        success: bool,
        /// Human-readable rejection reason; present only on failure.
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// The counterpart rang the bell. No payload.
    BellRung,
    /// Immediate answer to a `ping` probe. No payload.
    Pong,
}

impl ServerEvent {
    /// Builds the success outcome for a granted slot.
    #[must_use]
    pub const fn registration_accepted(name: PeerName) -> Self {
        Self::Registered {
            name: Some(name),
            success: true,
            message: None,
        }
    }

    /// Builds the failure outcome for a rejected registration.
    ///
    /// A single generic message covers both causes (slot taken,
    /// unrecognized name); the protocol does not distinguish them.
    #[must_use]
    pub fn registration_rejected() -> Self {
        Self::Registered {
            name: None,
            success: false,
            message: Some(REJECTION_MESSAGE.to_string()),
        }
    }
}
