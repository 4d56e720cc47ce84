//! Liveness and health check endpoints.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Liveness probe response.
#[derive(Serialize)]
pub struct LivenessResponse {
    /// Fixed banner.
    pub message: &'static str,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// GET `/` - Liveness probe.
async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        message: "Bank Lending API is running",
    })
}

/// GET `/health` - Health check.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health_check))
}
