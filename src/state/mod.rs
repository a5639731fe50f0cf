// State management module
// Handles the agent table and the application state shared with the server

pub mod agent_table;
pub mod app_state;

pub use agent_table::{Agent, AgentId, AgentTable, SharedAgentTable, AGENT_COUNT};
pub use app_state::AppState;
