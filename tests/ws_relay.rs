//! End-to-end relay tests over real sockets.
//!
//! Each test serves the full router on an ephemeral port and drives it
//! with `tokio-tungstenite` WebSocket clients (plus `reqwest` for the
//! health endpoint).

#![allow(clippy::panic)]

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use callbell::api;
use callbell::app_state::AppState;
use callbell::domain::PeerRegistry;
use callbell::relay::RelayDispatcher;
use callbell::ws::handler::ws_handler;

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start_server() -> SocketAddr {
    let registry = Arc::new(PeerRegistry::new());
    let relay = Arc::new(RelayDispatcher::new(registry));
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .with_state(AppState { relay });

    let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
        panic!("failed to bind ephemeral port");
    };
    let Ok(addr) = listener.local_addr() else {
        panic!("failed to read bound address");
    };
    tokio::spawn(axum::serve(listener, app).into_future());
    addr
}

async fn connect(addr: SocketAddr) -> WsClient {
    let Ok((client, _)) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws")).await else {
        panic!("websocket connect failed");
    };
    client
}

async fn send(client: &mut WsClient, value: Value) {
    let Ok(()) = client.send(Message::text(value.to_string())).await else {
        panic!("websocket send failed");
    };
}

/// Awaits the next text frame and decodes it, skipping control frames.
async fn recv(client: &mut WsClient) -> Value {
    loop {
        let Ok(Some(msg)) = tokio::time::timeout(Duration::from_secs(5), client.next()).await
        else {
            panic!("timed out waiting for a frame");
        };
        let Ok(msg) = msg else {
            panic!("websocket receive failed");
        };
        if let Message::Text(text) = msg {
            let Ok(value) = serde_json::from_str(text.as_str()) else {
                panic!("server sent non-JSON frame: {text}");
            };
            return value;
        }
    }
}

async fn register(client: &mut WsClient, name: &str) -> Value {
    send(client, json!({"event": "register", "name": name})).await;
    recv(client).await
}

fn event_name(value: &Value) -> &str {
    value.get("event").and_then(Value::as_str).unwrap_or("")
}

fn is_success(value: &Value) -> bool {
    value.get("success").and_then(Value::as_bool) == Some(true)
}

async fn fetch_health(addr: SocketAddr) -> Value {
    let Ok(response) = reqwest::get(format!("http://{addr}/health")).await else {
        panic!("health request failed");
    };
    let Ok(body) = response.json().await else {
        panic!("health body was not JSON");
    };
    body
}

fn slot_occupied(health: &Value, slot: &str) -> bool {
    health
        .get("slots")
        .and_then(|slots| slots.get(slot))
        .and_then(Value::as_bool)
        == Some(true)
}

/// Polls `/health` until the given slot reads unoccupied; disconnect
/// cleanup runs in the connection's own task, so tests must not race it.
async fn wait_for_slot_release(addr: SocketAddr, slot: &str) {
    for _ in 0..100 {
        if !slot_occupied(&fetch_health(addr).await, slot) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("slot {slot} was never released");
}

#[tokio::test]
async fn first_registrant_wins_and_loser_takes_other_slot() {
    let addr = start_server().await;
    let mut c1 = connect(addr).await;
    let mut c2 = connect(addr).await;

    let granted = register(&mut c1, "clientA").await;
    assert_eq!(event_name(&granted), "registered");
    assert!(is_success(&granted));
    assert_eq!(
        granted.get("name").and_then(Value::as_str),
        Some("clientA")
    );

    let rejected = register(&mut c2, "clientA").await;
    assert_eq!(event_name(&rejected), "registered");
    assert!(!is_success(&rejected));
    assert!(rejected.get("name").is_none());
    assert!(
        rejected
            .get("message")
            .and_then(Value::as_str)
            .is_some_and(|m| m.contains("already taken or invalid"))
    );

    let granted = register(&mut c2, "clientB").await;
    assert!(is_success(&granted));
    assert_eq!(
        granted.get("name").and_then(Value::as_str),
        Some("clientB")
    );
}

#[tokio::test]
async fn unknown_peer_name_is_rejected() {
    let addr = start_server().await;
    let mut client = connect(addr).await;

    let response = register(&mut client, "clientC").await;
    assert!(!is_success(&response));

    // The connection survives a rejection and may retry.
    let response = register(&mut client, "clientB").await;
    assert!(is_success(&response));
}

#[tokio::test]
async fn ring_is_relayed_to_the_counterpart_in_both_directions() {
    let addr = start_server().await;
    let mut c1 = connect(addr).await;
    let mut c2 = connect(addr).await;
    assert!(is_success(&register(&mut c1, "clientA").await));
    assert!(is_success(&register(&mut c2, "clientB").await));

    send(&mut c1, json!({"event": "ring"})).await;
    assert_eq!(event_name(&recv(&mut c2).await), "bell-rung");

    send(&mut c2, json!({"event": "ring"})).await;
    assert_eq!(event_name(&recv(&mut c1).await), "bell-rung");
}

#[tokio::test]
async fn ring_without_counterpart_is_silently_dropped() {
    let addr = start_server().await;
    let mut client = connect(addr).await;
    assert!(is_success(&register(&mut client, "clientA").await));

    // Frames from one connection are handled in order, so a pong
    // arriving next proves the ring produced no response at all.
    send(&mut client, json!({"event": "ring"})).await;
    send(&mut client, json!({"event": "ping"})).await;
    assert_eq!(event_name(&recv(&mut client).await), "pong");
}

#[tokio::test]
async fn ping_is_answered_even_without_registration() {
    let addr = start_server().await;
    let mut client = connect(addr).await;

    send(&mut client, json!({"event": "ping"})).await;
    assert_eq!(event_name(&recv(&mut client).await), "pong");
}

#[tokio::test]
async fn unrecognized_events_are_ignored() {
    let addr = start_server().await;
    let mut client = connect(addr).await;

    send(&mut client, json!({"event": "shout", "volume": 11})).await;
    send(&mut client, json!({"not": "an event"})).await;

    // Still alive and still serving the protocol.
    send(&mut client, json!({"event": "ping"})).await;
    assert_eq!(event_name(&recv(&mut client).await), "pong");
}

#[tokio::test]
async fn disconnect_frees_the_slot_for_a_new_registrant() {
    let addr = start_server().await;
    let mut c1 = connect(addr).await;
    let mut c2 = connect(addr).await;

    assert!(is_success(&register(&mut c1, "clientA").await));
    assert!(!is_success(&register(&mut c2, "clientA").await));
    assert!(is_success(&register(&mut c2, "clientB").await));

    send(&mut c1, json!({"event": "ring"})).await;
    assert_eq!(event_name(&recv(&mut c2).await), "bell-rung");

    let _ = c1.close(None).await;
    drop(c1);
    wait_for_slot_release(addr, "client_a").await;

    let mut c3 = connect(addr).await;
    assert!(is_success(&register(&mut c3, "clientA").await));

    send(&mut c3, json!({"event": "ring"})).await;
    assert_eq!(event_name(&recv(&mut c2).await), "bell-rung");
}

#[tokio::test]
async fn health_reports_slot_occupancy() {
    let addr = start_server().await;

    let health = fetch_health(addr).await;
    assert_eq!(
        health.get("status").and_then(Value::as_str),
        Some("healthy")
    );
    assert!(!slot_occupied(&health, "client_a"));
    assert!(!slot_occupied(&health, "client_b"));

    let mut client = connect(addr).await;
    assert!(is_success(&register(&mut client, "clientB").await));

    let health = fetch_health(addr).await;
    assert!(!slot_occupied(&health, "client_a"));
    assert!(slot_occupied(&health, "client_b"));

    let _ = client.close(None).await;
    drop(client);
    wait_for_slot_release(addr, "client_b").await;
}
