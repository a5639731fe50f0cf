//! WebSocket handlers for real-time updates
//!
//! Each connected client receives the current agent table right away and then
//! every `ai_update` event published on the broadcast hub. Supports ping/pong
//! for connection keepalive.

use crate::broadcast::{encode_event, AI_UPDATE_EVENT};
use crate::state::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, error, info, warn};

/// Interval between server-initiated keepalive pings
const PING_INTERVAL_SECS: u64 = 30;

/// Pending pongs and keepalive pings per client
const CONTROL_QUEUE_CAPACITY: usize = 16;

/// Control messages exchanged with clients
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum WebSocketMessage {
    /// Ping message for connection keepalive
    #[serde(rename = "ping")]
    Ping,
    /// Pong message responding to ping
    #[serde(rename = "pong")]
    Pong,
    /// The client fell behind and missed some updates
    #[serde(rename = "warning")]
    Warning {
        /// Human-readable description
        message: String,
    },
}

/// WebSocket upgrade handler
///
/// # Arguments
/// * `ws` - WebSocket upgrade request
/// * `state` - Application state holding the agent table and broadcast hub
///
/// # Returns
/// * `Response` - HTTP response initiating WebSocket connection
pub async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Wait for the next hub frame and turn it into an outgoing message
///
/// A receiver that fell more than the hub capacity behind yields a `warning`
/// frame and resumes at the oldest retained update. Returns `None` once the
/// hub is gone.
async fn next_update(updates: &mut broadcast::Receiver<String>) -> Option<Message> {
    match updates.recv().await {
        Ok(frame) => Some(Message::Text(frame)),
        Err(RecvError::Lagged(skipped)) => {
            warn!(skipped, "WebSocket client lagged behind updates");
            let warning = WebSocketMessage::Warning {
                message: format!("client lagged and skipped {} update(s)", skipped),
            };
            match serde_json::to_string(&warning) {
                Ok(text) => Some(Message::Text(text)),
                Err(e) => {
                    error!("Failed to encode lag warning: {}", e);
                    None
                }
            }
        }
        Err(RecvError::Closed) => None,
    }
}

// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    // Subscribe before reading the table so no update falls between the two
    let mut updates = state.hub.subscribe();
    info!(
        subscribers = state.hub.subscriber_count(),
        "WebSocket client connected"
    );

    // Send initial state
    let initial_state = {
        let table = state.agents.read().await;
        encode_event(AI_UPDATE_EVENT, &table.get_all())
    };
    let initial_state = match initial_state {
        Ok(frame) => frame,
        Err(e) => {
            error!("Failed to encode initial state: {}", e);
            return;
        }
    };

    if let Err(e) = sender.send(Message::Text(initial_state)).await {
        error!("Failed to send initial state: {}", e);
        return;
    }

    // Control replies and keepalive pings share one bounded queue
    let (tx, mut rx) = tokio::sync::mpsc::channel::<Message>(CONTROL_QUEUE_CAPACITY);

    // Single writer: awaits the socket directly so a slow client shows up as
    // lag on its hub receiver instead of an ever-growing backlog
    let mut send_task = tokio::spawn(async move {
        loop {
            let msg = tokio::select! {
                control = rx.recv() => match control {
                    Some(msg) => msg,
                    None => break,
                },
                update = next_update(&mut updates) => match update {
                    Some(msg) => msg,
                    None => break,
                },
            };
            if let Err(e) = sender.send(msg).await {
                error!("Failed to send message: {}", e);
                break;
            }
        }
    });

    // Task to send periodic pings
    let ping_tx = tx.clone();
    let mut ping_task = tokio::spawn(async move {
        loop {
            tokio::time::sleep(tokio::time::Duration::from_secs(PING_INTERVAL_SECS)).await;
            if ping_tx.send(Message::Ping(vec![])).await.is_err() {
                break;
            }
        }
    });

    // Receive messages
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(text)) => match serde_json::from_str::<WebSocketMessage>(&text) {
                    Ok(WebSocketMessage::Ping) => {
                        if let Ok(pong_msg) = serde_json::to_string(&WebSocketMessage::Pong) {
                            if tx.send(Message::Text(pong_msg)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Ok(ws_msg) => {
                        warn!("Received unhandled WebSocket message: {:?}", ws_msg);
                    }
                    Err(_) => {
                        debug!("Ignoring unrecognized WebSocket text frame");
                    }
                },
                Ok(Message::Close(_)) => {
                    info!("WebSocket client disconnected");
                    break;
                }
                Ok(Message::Pong(_)) => {
                    // Client responded to ping
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    // Wait for any task to complete
    tokio::select! {
        _ = &mut send_task => {}
        _ = &mut ping_task => {}
        _ = &mut recv_task => {}
    }
    send_task.abort();
    ping_task.abort();
    recv_task.abort();

    info!("WebSocket connection closed");
}
