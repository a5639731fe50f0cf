//! Agent simulation
//!
//! The thought catalogue and the background loop that refreshes the agent
//! table and publishes it to connected clients.

pub mod thoughts;
pub mod update_loop;

pub use thoughts::{random_thought, THOUGHTS};
pub use update_loop::{UpdateLoop, UPDATE_INTERVAL};

use crate::state::AppState;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Spawn the update loop as a background task
///
/// The loop writes `state.agents` and publishes through `state.hub` until
/// `shutdown` is cancelled.
pub fn spawn_update_loop(state: &AppState, shutdown: CancellationToken) -> JoinHandle<()> {
    let update_loop = UpdateLoop::new(state.agents.clone(), state.hub.clone());
    tokio::spawn(update_loop.run(shutdown))
}
