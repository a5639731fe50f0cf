//! API module
//!
//! HTTP route table, request middleware, and the handlers behind them

pub mod agents;
pub mod status;

use crate::state::AppState;
use crate::websocket;
use axum::{extract::Request, middleware::Next, response::Response, routing::get, Router};
use std::time::Instant;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Request ID middleware - adds unique ID to each request for tracing
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    let response = next.run(request).instrument(span).await;

    let duration = start.elapsed();
    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status::home))
        .route("/api/health", get(status::health_check))
        .route("/api/agents", get(agents::list_agents))
        .route("/api/agents/:id", get(agents::get_agent))
        // WebSocket for real-time updates
        .route("/ws", get(websocket::websocket_handler))
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive()) // Clients are served from any origin
        .with_state(state)
}
