//! Relay dispatcher: drives the registry and forwards events.
//!
//! One dispatcher serves all connections. Every method is
//! side-effect-only: registration conflicts come back as a `registered`
//! failure event, and every other miss (no counterpart, counterpart just
//! closed, sender unregistered) is an expected no-op, not an error.

use std::sync::Arc;

use crate::domain::{
    ConnectionId, OutboundSink, PeerEntry, PeerRegistry, RegistrationOutcome, ServerEvent,
};

/// Orchestration layer between the transport and the [`PeerRegistry`].
#[derive(Debug, Clone)]
pub struct RelayDispatcher {
    registry: Arc<PeerRegistry>,
}

impl RelayDispatcher {
    /// Creates a dispatcher over the given registry.
    #[must_use]
    pub fn new(registry: Arc<PeerRegistry>) -> Self {
        Self { registry }
    }

    /// Returns a reference to the inner [`PeerRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<PeerRegistry> {
        &self.registry
    }

    /// Handles a `register` request and returns the outcome event for
    /// the requester.
    ///
    /// Unrecognized names and occupied slots produce the same generic
    /// rejection; the connection stays open and may retry.
    pub async fn register(
        &self,
        connection_id: ConnectionId,
        requested_name: &str,
        outbox: OutboundSink,
    ) -> ServerEvent {
        let Ok(name) = requested_name.parse() else {
            tracing::warn!(%connection_id, requested_name, "registration rejected: unrecognized peer name");
            return ServerEvent::registration_rejected();
        };

        let entry = PeerEntry::new(connection_id, outbox);
        match self.registry.register(name, entry).await {
            RegistrationOutcome::Accepted(name) => {
                tracing::info!(%connection_id, peer = %name, "peer registered");
                ServerEvent::registration_accepted(name)
            }
            RegistrationOutcome::Rejected => {
                tracing::warn!(%connection_id, peer = %name, "registration rejected: slot taken");
                ServerEvent::registration_rejected()
            }
        }
    }

    /// Handles a `ring` from `sender`: forwards `bell-rung` to the
    /// registered counterpart, fire-and-forget.
    ///
    /// Dropped silently when the sender holds no slot or the opposite
    /// slot is empty; the ringer gets no feedback either way.
    pub async fn ring(&self, sender: ConnectionId) {
        match self.registry.resolve_opposite(sender).await {
            Some(counterpart) => {
                tracing::debug!(from = %sender, to = %counterpart.connection_id, "forwarding bell");
                counterpart.send(ServerEvent::BellRung);
            }
            None => {
                tracing::debug!(from = %sender, "bell dropped: no registered counterpart");
            }
        }
    }

    /// Handles a `ping`: answers `pong` on the prober's own channel.
    ///
    /// A pure liveness/latency probe — answered locally, never relayed,
    /// no registry interaction.
    pub fn ping(&self, outbox: &OutboundSink) {
        if outbox.send(ServerEvent::Pong).is_err() {
            tracing::debug!("dropping pong for closed connection");
        }
    }

    /// Handles connection close: releases any slot held by
    /// `connection_id`.
    ///
    /// Called exactly once per connection when its loop exits, for
    /// normal and abnormal disconnects alike.
    pub async fn disconnect(&self, connection_id: ConnectionId) {
        if let Some(name) = self.registry.release(connection_id).await {
            tracing::info!(%connection_id, peer = %name, "peer slot released");
        }
    }
}
