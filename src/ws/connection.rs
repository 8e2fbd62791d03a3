//! Per-connection read/write loop.
//!
//! Each accepted WebSocket gets a fresh [`ConnectionId`] and an
//! unbounded outbound channel; the sender half is what the registry
//! stores as the connection handle. The loop multiplexes inbound frames
//! and outbound events, and on exit always runs the disconnect path so
//! a held slot is released even on abnormal closes.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use super::messages::ClientEvent;
use crate::domain::{ConnectionId, OutboundSink, ServerEvent};
use crate::relay::RelayDispatcher;

/// Runs the read/write loop for a single WebSocket connection.
pub async fn run_connection(socket: WebSocket, relay: Arc<RelayDispatcher>) {
    let connection_id = ConnectionId::new();
    let (outbox, mut events) = mpsc::unbounded_channel::<ServerEvent>();
    let (mut ws_tx, mut ws_rx) = socket.split();

    tracing::info!(%connection_id, "client connected");

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        dispatch_text(&text, connection_id, &relay, &outbox).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(err)) => {
                        tracing::debug!(%connection_id, error = %err, "ws receive error");
                        break;
                    }
                    // Binary and protocol-level ping/pong frames carry
                    // nothing in this protocol.
                    _ => {}
                }
            }
            event = events.recv() => {
                let Some(event) = event else { break };
                let json = serde_json::to_string(&event).unwrap_or_default();
                if ws_tx.send(Message::text(json)).await.is_err() {
                    break;
                }
            }
        }
    }

    // Guaranteed cleanup: pairs every connect with exactly one release,
    // whether the peer closed cleanly or the socket errored.
    relay.disconnect(connection_id).await;
    tracing::info!(%connection_id, "client disconnected");
}

/// Decodes one inbound text frame and routes it through the dispatcher.
async fn dispatch_text(
    text: &str,
    connection_id: ConnectionId,
    relay: &RelayDispatcher,
    outbox: &OutboundSink,
) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(err) => {
            tracing::debug!(%connection_id, error = %err, "ignoring unrecognized frame");
            return;
        }
    };

    match event {
        ClientEvent::Register { name } => {
            let response = relay.register(connection_id, &name, outbox.clone()).await;
            let _ = outbox.send(response);
        }
        ClientEvent::Ring => relay.ring(connection_id).await,
        ClientEvent::Ping => relay.ping(outbox),
    }
}
