//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod employees;
pub mod health;
pub mod manager;
pub mod responses;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(employees::routes())
        .merge(manager::routes())
}
