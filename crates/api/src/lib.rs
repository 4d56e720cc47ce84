//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes
//! - Request extractors
//! - Error to response mapping

pub mod error;
pub mod extractors;
pub mod routes;

use axum::Router;
use lendbook_core::lending::RateTable;
use lendbook_db::LoanRepository;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loan store. Clones share the pool and the per-loan payment queues.
    pub loans: LoanRepository,
    /// Interest rates applied to newly issued loans.
    pub rates: Arc<RateTable>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
