//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for employees and managers
//! - Request and response types (camelCase JSON)
//! - Mapping of domain errors to HTTP responses

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use reimburse_core::{ExpenseService, ReimbursementStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Expense service over the configured store.
    pub expenses: ExpenseService,
}

impl AppState {
    /// Creates state over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn ReimbursementStore>) -> Self {
        Self {
            expenses: ExpenseService::new(store),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
