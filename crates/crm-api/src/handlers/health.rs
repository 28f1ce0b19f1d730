//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{DatabaseHealth, DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

/// GET /health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let connected = match state.repos.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    Json(DetailedHealthResponse {
        status: if connected { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        database: DatabaseHealth {
            provider: state.repos.provider_name().to_string(),
            status: if connected { "connected" } else { "unavailable" }.to_string(),
        },
    })
}
