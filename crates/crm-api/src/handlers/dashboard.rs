//! Dashboard handlers.

use axum::Json;
use axum::extract::State;

use crm_core::error::AppError;
use crm_entity::client::ClientStats;

use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /dashboard/stats
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ClientStats>, AppError> {
    let stats = state.dashboard_service.stats(&auth).await?;
    Ok(Json(stats))
}
