//! Domain layer: peer identities, connection ids, the slot registry,
//! and the outbound event vocabulary.
//!
//! This module is transport-agnostic: it knows nothing about WebSockets
//! or HTTP, only about the two slots and the events that flow to their
//! occupants.

pub mod connection_id;
pub mod event;
pub mod peer;
pub mod registry;

pub use connection_id::ConnectionId;
pub use event::ServerEvent;
pub use peer::PeerName;
pub use registry::{OutboundSink, PeerEntry, PeerRegistry, RegistrationOutcome, SlotOccupancy};
