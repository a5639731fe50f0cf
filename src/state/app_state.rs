// Application state
// Owns the agent table and the broadcast hub, handed to the update loop and the router

use crate::broadcast::BroadcastHub;
use crate::state::agent_table::{AgentTable, SharedAgentTable, AGENT_COUNT};

/// Main application state
/// Cloning is cheap: both fields are handles to shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Agent table written by the update loop and read by handlers
    pub agents: SharedAgentTable,
    /// Push channel every WebSocket client subscribes to
    pub hub: BroadcastHub,
}

impl AppState {
    /// Create the state with a freshly initialized table of `AGENT_COUNT` agents
    pub fn new() -> Self {
        Self::with_table(AgentTable::initialize(AGENT_COUNT))
    }

    /// Create the state around an existing table
    pub fn with_table(table: AgentTable) -> Self {
        Self {
            agents: table.into_shared(),
            hub: BroadcastHub::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
