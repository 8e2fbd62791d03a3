//! The two-slot peer registry.
//!
//! [`PeerRegistry`] owns the identity→connection bindings for `clientA`
//! and `clientB` behind a single [`tokio::sync::RwLock`]. Registration
//! and release are check-then-set under one write guard, so concurrent
//! registration races for a slot resolve deterministically: the first
//! writer wins, the second is rejected.

use tokio::sync::RwLock;
use tokio::sync::mpsc;

use super::{ConnectionId, PeerName, ServerEvent};

/// Outbound handle for one connection.
///
/// The receiving end lives in the connection's write loop; sending never
/// blocks, and sending to a closed loop is a silent no-op.
pub type OutboundSink = mpsc::UnboundedSender<ServerEvent>;

/// A slot binding: the occupying connection and its outbound handle.
#[derive(Debug, Clone)]
pub struct PeerEntry {
    /// The occupying connection.
    pub connection_id: ConnectionId,
    outbox: OutboundSink,
}

impl PeerEntry {
    /// Creates a binding for the given connection.
    #[must_use]
    pub const fn new(connection_id: ConnectionId, outbox: OutboundSink) -> Self {
        Self {
            connection_id,
            outbox,
        }
    }

    /// Sends an event to this connection, fire-and-forget.
    ///
    /// If the connection's loop has already exited the event is dropped;
    /// the relay never retries and never surfaces delivery failures.
    pub fn send(&self, event: ServerEvent) {
        if self.outbox.send(event).is_err() {
            tracing::debug!(connection_id = %self.connection_id, "dropping event for closed connection");
        }
    }
}

/// Outcome of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The slot was empty and is now bound to the requester.
    Accepted(PeerName),
    /// The slot was occupied, or the requester already holds a slot.
    Rejected,
}

/// Snapshot of which slots are occupied, for the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SlotOccupancy {
    /// Whether the `clientA` slot is occupied.
    pub client_a: bool,
    /// Whether the `clientB` slot is occupied.
    pub client_b: bool,
}

/// The two slots. All access goes through the registry's single lock.
#[derive(Debug, Default)]
struct SlotTable {
    client_a: Option<PeerEntry>,
    client_b: Option<PeerEntry>,
}

impl SlotTable {
    fn slot(&self, name: PeerName) -> &Option<PeerEntry> {
        match name {
            PeerName::ClientA => &self.client_a,
            PeerName::ClientB => &self.client_b,
        }
    }

    fn slot_mut(&mut self, name: PeerName) -> &mut Option<PeerEntry> {
        match name {
            PeerName::ClientA => &mut self.client_a,
            PeerName::ClientB => &mut self.client_b,
        }
    }

    /// Returns the name of the slot held by `connection_id`, if any.
    fn holder_of(&self, connection_id: ConnectionId) -> Option<PeerName> {
        [PeerName::ClientA, PeerName::ClientB]
            .into_iter()
            .find(|name| {
                self.slot(*name)
                    .as_ref()
                    .is_some_and(|entry| entry.connection_id == connection_id)
            })
    }
}

/// Registry of the two peer slots.
///
/// # Concurrency
///
/// One `RwLock` over the whole table is the single mutual-exclusion
/// domain for both slots: `register` and `release` mutate under the
/// write guard, lookups read under the read guard. Every operation is
/// constant-time and non-blocking beyond the lock wait.
#[derive(Debug, Default)]
pub struct PeerRegistry {
    slots: RwLock<SlotTable>,
}

impl PeerRegistry {
    /// Creates a registry with both slots empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to bind `entry` to the slot named `name`.
    ///
    /// Rejects if the slot is occupied by any connection (stale ones
    /// included — cleanup happens only on disconnect) or if the
    /// requesting connection already holds a slot; a connection may
    /// occupy at most one slot at a time. Never evicts an occupant.
    pub async fn register(&self, name: PeerName, entry: PeerEntry) -> RegistrationOutcome {
        let mut table = self.slots.write().await;
        if table.holder_of(entry.connection_id).is_some() {
            return RegistrationOutcome::Rejected;
        }
        let slot = table.slot_mut(name);
        if slot.is_some() {
            return RegistrationOutcome::Rejected;
        }
        *slot = Some(entry);
        RegistrationOutcome::Accepted(name)
    }

    /// Empties whichever slot `connection_id` holds, returning its name.
    ///
    /// No-op returning `None` when the connection holds no slot.
    /// Idempotent; called on every disconnect, normal or abnormal.
    pub async fn release(&self, connection_id: ConnectionId) -> Option<PeerName> {
        let mut table = self.slots.write().await;
        let name = table.holder_of(connection_id)?;
        *table.slot_mut(name) = None;
        Some(name)
    }

    /// Resolves the counterpart of `connection_id`.
    ///
    /// Returns the opposite slot's binding if the caller currently holds
    /// a slot and the opposite slot is occupied; `None` otherwise.
    pub async fn resolve_opposite(&self, connection_id: ConnectionId) -> Option<PeerEntry> {
        let table = self.slots.read().await;
        let name = table.holder_of(connection_id)?;
        table.slot(name.opposite()).clone()
    }

    /// Returns which slots are currently occupied.
    pub async fn occupancy(&self) -> SlotOccupancy {
        let table = self.slots.read().await;
        SlotOccupancy {
            client_a: table.client_a.is_some(),
            client_b: table.client_b.is_some(),
        }
    }
}
