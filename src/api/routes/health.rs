use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::api::state::ApiState;
use crate::global::database::ping_database;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Serialize)]
pub struct DatabaseHealthResponse {
    connected: bool,
    database: String,
    reachable: bool,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Report whether the handle is connected and the server answers a ping.
pub async fn database_health(
    State(state): State<ApiState>,
) -> (StatusCode, Json<DatabaseHealthResponse>) {
    // Only the database clone is pinged so lifecycle calls are never blocked on it
    let (connected, database_name, database) = {
        let db = state.db.read().await;
        (db.is_connected(), db.database_name().to_string(), db.database())
    };

    let reachable = match database {
        Ok(database) => {
            match tokio::time::timeout(state.ping_timeout, ping_database(&database)).await {
                Ok(Ok(())) => true,
                Ok(Err(e)) => {
                    warn!(error = %e, "Database health check failed");
                    false
                }
                Err(_) => {
                    warn!(timeout = ?state.ping_timeout, "Database health check timed out");
                    false
                }
            }
        }
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            false
        }
    };

    let status = if reachable {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(DatabaseHealthResponse {
            connected,
            database: database_name,
            reachable,
        }),
    )
}
