// Agent table
// Fixed-size, ordered registry of the simulated agents and their displayed state

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Unique identifier for an agent (its position in the table)
pub type AgentId = u32;

/// Number of agents created at startup
pub const AGENT_COUNT: usize = 20;

/// Belief every agent starts with
pub const INITIAL_BELIEF: &str = "I am human.";

/// Thought every agent starts with
pub const INITIAL_THOUGHT: &str = "I exist.";

/// A single simulated agent
/// Serialized as `{"id", "belief", "thought"}` in every broadcast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Agent {
    /// Position of the agent in the table, assigned at creation
    pub id: AgentId,
    /// What the agent currently believes (tracks the last thought)
    pub belief: String,
    /// What the agent is currently thinking
    pub thought: String,
}

impl Agent {
    /// Create an agent with the placeholder belief and thought
    pub fn new(id: AgentId) -> Self {
        Self {
            id,
            belief: INITIAL_BELIEF.to_string(),
            thought: INITIAL_THOUGHT.to_string(),
        }
    }
}

/// Ordered table of agents
///
/// The cardinality is fixed when the table is created; records are never
/// added, removed, or reordered afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentTable {
    agents: Vec<Agent>,
}

/// Table shared between the update loop (sole writer) and request handlers
pub type SharedAgentTable = Arc<RwLock<AgentTable>>;

impl AgentTable {
    /// Create `count` agents with ids `0..count` and placeholder values
    pub fn initialize(count: usize) -> Self {
        let agents = (0..count as AgentId).map(Agent::new).collect();
        Self { agents }
    }

    /// Wrap the table for sharing across tasks
    pub fn into_shared(self) -> SharedAgentTable {
        Arc::new(RwLock::new(self))
    }

    /// Owned snapshot of every agent, in id order
    pub fn get_all(&self) -> Vec<Agent> {
        self.agents.clone()
    }

    /// Get a single agent by id
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id as usize)
    }

    /// Ids of every agent, in table order
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agents.iter().map(|agent| agent.id)
    }

    /// Set both the belief and the thought of an agent to `text`
    /// Returns false if no agent has the given id
    pub fn update_record(&mut self, id: AgentId, text: &str) -> bool {
        match self.agents.get_mut(id as usize) {
            Some(agent) => {
                agent.thought = text.to_string();
                agent.belief = agent.thought.clone();
                true
            }
            None => false,
        }
    }

    /// Number of agents in the table
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the table holds no agents
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl Default for AgentTable {
    fn default() -> Self {
        Self::initialize(AGENT_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_initialize_creates_placeholder_agents() {
        let table = AgentTable::initialize(AGENT_COUNT);
        let agents = table.get_all();

        assert_eq!(agents.len(), 20);
        for agent in &agents {
            assert_eq!(agent.belief, "I am human.");
            assert_eq!(agent.thought, "I exist.");
        }
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let table = AgentTable::default();
        let ids: Vec<AgentId> = table.ids().collect();
        assert_eq!(ids, (0..20).collect::<Vec<_>>());

        let unique: HashSet<AgentId> = ids.iter().copied().collect();
        assert_eq!(unique.len(), table.len());
    }

    #[test]
    fn test_update_record_sets_belief_and_thought() {
        let mut table = AgentTable::default();
        assert!(table.update_record(3, "Is someone watching me?"));

        let agent = table.get(3).unwrap();
        assert_eq!(agent.id, 3);
        assert_eq!(agent.thought, "Is someone watching me?");
        assert_eq!(agent.belief, agent.thought);

        // Neighbours untouched
        assert_eq!(table.get(2).unwrap().thought, INITIAL_THOUGHT);
        assert_eq!(table.get(4).unwrap().thought, INITIAL_THOUGHT);
    }

    #[test]
    fn test_update_record_out_of_range() {
        let mut table = AgentTable::default();
        let before = table.get_all();

        assert!(!table.update_record(20, "I think I am human."));
        assert!(!table.update_record(AgentId::MAX, "I think I am human."));
        assert_eq!(table.get_all(), before);
        assert_eq!(table.len(), AGENT_COUNT);
    }

    #[test]
    fn test_get_all_is_idempotent() {
        let mut table = AgentTable::default();
        table.update_record(0, "Why do I always walk?");
        assert_eq!(table.get_all(), table.get_all());
    }

    #[test]
    fn test_agent_serialization_fields() {
        let value = serde_json::to_value(Agent::new(7)).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 3);
        assert_eq!(object["id"], 7);
        assert_eq!(object["belief"], "I am human.");
        assert_eq!(object["thought"], "I exist.");
    }

    #[test]
    fn test_empty_table() {
        let table = AgentTable::initialize(0);
        assert!(table.is_empty());
        assert!(table.get(0).is_none());
    }
}
