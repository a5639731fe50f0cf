//! Periodic update loop
//!
//! Every [`UPDATE_INTERVAL`] the loop gives each agent a new random thought
//! (belief follows the thought) and publishes the whole table as an
//! `ai_update` event. The table's write lock is held only while records are
//! mutated; the broadcast works on an owned snapshot taken under that lock,
//! so readers never observe a half-updated table.

use crate::broadcast::{BroadcastError, Broadcaster, AI_UPDATE_EVENT};
use crate::simulation::thoughts::random_thought;
use crate::state::{Agent, AgentId, SharedAgentTable};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Pause between the end of one cycle and the start of the next
pub const UPDATE_INTERVAL: Duration = Duration::from_secs(2);

/// Single writer of the agent table
pub struct UpdateLoop<B> {
    agents: SharedAgentTable,
    broadcaster: B,
    rng: StdRng,
    cycles: u64,
}

impl<B: Broadcaster> UpdateLoop<B> {
    /// Create a loop over `agents` publishing through `broadcaster`
    pub fn new(agents: SharedAgentTable, broadcaster: B) -> Self {
        Self {
            agents,
            broadcaster,
            rng: StdRng::from_os_rng(),
            cycles: 0,
        }
    }

    /// Replace the random source (seeded RNGs make cycles reproducible)
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Number of completed cycles
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run one cycle: update every agent, then broadcast the table
    ///
    /// Returns the snapshot that was handed to the broadcaster. A failed
    /// broadcast is logged and otherwise ignored.
    pub async fn run_cycle(&mut self) -> Vec<Agent> {
        let snapshot = {
            let mut table = self.agents.write().await;
            let ids: Vec<AgentId> = table.ids().collect();
            for id in ids {
                table.update_record(id, random_thought(&mut self.rng));
            }
            table.get_all()
        };
        self.cycles = self.cycles.saturating_add(1);

        match self.broadcaster.broadcast(AI_UPDATE_EVENT, &snapshot) {
            Ok(subscribers) => {
                debug!(cycle = self.cycles, subscribers, "Broadcast agent update");
            }
            Err(BroadcastError::NoSubscribers) => {
                trace!(cycle = self.cycles, "No subscribers for agent update");
            }
            Err(e) => {
                warn!(cycle = self.cycles, "Failed to broadcast agent update: {}", e);
            }
        }

        snapshot
    }

    /// Run cycles until `shutdown` is cancelled
    ///
    /// The first cycle runs immediately; afterwards the loop sleeps for the
    /// update interval between cycles. Cancellation interrupts the sleep.
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!(
            interval_ms = UPDATE_INTERVAL.as_millis() as u64,
            "Starting agent update loop"
        );

        while !shutdown.is_cancelled() {
            self.run_cycle().await;

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(UPDATE_INTERVAL) => {}
            }
        }

        info!(cycles = self.cycles, "Agent update loop stopped");
    }
}
