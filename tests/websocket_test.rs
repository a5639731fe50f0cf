//! End-to-end tests for the WebSocket push channel

use futures_util::{SinkExt, StreamExt};
use matrix_backend::api;
use matrix_backend::broadcast::EventFrame;
use matrix_backend::simulation::{UpdateLoop, THOUGHTS};
use matrix_backend::state::{Agent, AppState, AGENT_COUNT};
use serde_json::Value;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Serve the router on an ephemeral port and connect one client to `/ws`
async fn connect(state: &AppState) -> Client {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = api::router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let (client, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    client
}

/// Next text frame, skipping protocol-level frames
async fn next_text(client: &mut Client) -> String {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), client.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("connection closed")
            .unwrap();
        if msg.is_text() {
            return msg.into_text().unwrap().to_string();
        }
    }
}

#[tokio::test]
async fn test_initial_frame_carries_current_table() {
    let state = AppState::new();
    let mut client = connect(&state).await;

    let frame = next_text(&mut client).await;
    let value: Value = serde_json::from_str(&frame).unwrap();
    assert_eq!(value["event"], "ai_update");

    let data = value["data"].as_array().unwrap();
    assert_eq!(data.len(), AGENT_COUNT);
    for (index, object) in data.iter().enumerate() {
        let object = object.as_object().unwrap();
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["belief", "id", "thought"]);
        assert_eq!(object["id"], index);
        assert_eq!(object["belief"], "I am human.");
        assert_eq!(object["thought"], "I exist.");
    }
}

#[tokio::test]
async fn test_cycles_are_forwarded_in_order() {
    let state = AppState::new();
    let mut client = connect(&state).await;
    next_text(&mut client).await;

    let mut update_loop = UpdateLoop::new(state.agents.clone(), state.hub.clone());
    let first = update_loop.run_cycle().await;
    let second = update_loop.run_cycle().await;

    for expected in [first, second] {
        let frame: EventFrame<Vec<Agent>> =
            serde_json::from_str(&next_text(&mut client).await).unwrap();
        assert_eq!(frame.event, "ai_update");
        assert_eq!(frame.data, expected);
        for agent in &frame.data {
            assert!(THOUGHTS.contains(&agent.thought.as_str()));
            assert_eq!(agent.belief, agent.thought);
        }
    }
}

#[tokio::test]
async fn test_ping_text_frame_gets_pong() {
    let state = AppState::new();
    let mut client = connect(&state).await;
    next_text(&mut client).await;

    client
        .send(Message::Text(r#"{"type":"ping"}"#.into()))
        .await
        .unwrap();

    let reply: Value = serde_json::from_str(&next_text(&mut client).await).unwrap();
    assert_eq!(reply, serde_json::json!({ "type": "pong" }));
}
