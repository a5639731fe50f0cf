//! Read-only agent queries
//!
//! Both handlers read a snapshot of the agent table; the update loop remains
//! the only writer.

use crate::error::AppError;
use crate::state::{Agent, AgentId, AppState};
use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct AgentsListResponse {
    pub agents: Vec<Agent>,
    pub count: usize,
}

// GET /api/agents - List all agents
pub async fn list_agents(
    State(state): State<AppState>,
) -> Result<Json<AgentsListResponse>, AppError> {
    let agents = state.agents.read().await.get_all();

    Ok(Json(AgentsListResponse {
        count: agents.len(),
        agents,
    }))
}

// GET /api/agents/:id - Get a specific agent
pub async fn get_agent(
    State(state): State<AppState>,
    Path(id): Path<AgentId>,
) -> Result<Json<Agent>, AppError> {
    let table = state.agents.read().await;
    let agent = table.get(id).ok_or(AppError::AgentNotFound(id))?;

    Ok(Json(agent.clone()))
}
