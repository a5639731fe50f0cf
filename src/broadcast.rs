//! Push-notification layer
//!
//! The update loop publishes through the [`Broadcaster`] trait. [`BroadcastHub`]
//! implements it on top of a `tokio::sync::broadcast` channel; every connected
//! WebSocket client holds a receiver and forwards encoded frames to its socket.

use crate::state::Agent;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;

/// Event name used for table updates
pub const AI_UPDATE_EVENT: &str = "ai_update";

/// Number of frames a slow subscriber may fall behind before it starts skipping
pub const CHANNEL_CAPACITY: usize = 64;

/// Errors that can occur while publishing an event
#[derive(Error, Debug)]
pub enum BroadcastError {
    /// Nobody is listening; the event was dropped
    #[error("No subscribers connected")]
    NoSubscribers,

    /// The payload could not be encoded
    #[error("Failed to encode event: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Wire format of a pushed event
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EventFrame<T> {
    /// Event name (e.g. `ai_update`)
    pub event: String,
    /// Event payload
    pub data: T,
}

/// Encode an event as the JSON text frame sent to clients
pub fn encode_event(event: &str, payload: &[Agent]) -> Result<String, BroadcastError> {
    let frame = EventFrame {
        event: event.to_string(),
        data: payload,
    };
    Ok(serde_json::to_string(&frame)?)
}

/// Something that can push an event to all current subscribers
pub trait Broadcaster: Send + Sync {
    /// Publish `payload` under `event`
    /// Returns the number of subscribers the event was queued for
    fn broadcast(&self, event: &str, payload: &[Agent]) -> Result<usize, BroadcastError>;
}

/// Fan-out hub shared by the update loop and the WebSocket handlers
#[derive(Debug, Clone)]
pub struct BroadcastHub {
    tx: broadcast::Sender<String>,
}

impl BroadcastHub {
    /// Create a hub with no subscribers
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Register a new subscriber; it receives every frame published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }

    /// Number of currently registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}

impl Broadcaster for BroadcastHub {
    fn broadcast(&self, event: &str, payload: &[Agent]) -> Result<usize, BroadcastError> {
        let frame = encode_event(event, payload)?;
        self.tx
            .send(frame)
            .map_err(|_| BroadcastError::NoSubscribers)
    }
}
