//! Informational routes

use axum::Json;
use serde::Serialize;

/// Banner returned by `GET /`
pub const BANNER: &str = "Matrix AI backend running.";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub message: String,
}

// GET / - Plain-text confirmation that the backend is up
pub async fn home() -> &'static str {
    BANNER
}

// GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Backend is healthy".to_string(),
    })
}
