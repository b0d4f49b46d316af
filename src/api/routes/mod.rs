pub mod health;

use axum::{Router, routing::get};

use crate::api::state::ApiState;

/// Create the main API router
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/health/database", get(health::database_health))
        .with_state(state)
}
