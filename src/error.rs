//! Error types and error handling for the application
//!
//! HTTP-facing errors implement `IntoResponse` to provide consistent error
//! formatting. Push-layer errors live in `crate::broadcast`.

use crate::state::AgentId;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Agent with the given ID was not found
    #[error("Agent not found: {0}")]
    AgentNotFound(AgentId),

    /// Error occurred while publishing an event
    #[error("Broadcast error: {0}")]
    Broadcast(#[from] crate::broadcast::BroadcastError),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::AgentNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Broadcast(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
