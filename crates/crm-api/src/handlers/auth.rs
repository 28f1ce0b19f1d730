//! Auth handlers: login, refresh, logout, profile.

use axum::Json;
use axum::extract::State;

use crm_auth::jwt::TokenPair;
use crm_core::error::AppError;

use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::dto::response::{LoginResponse, MessageResponse, SessionUser};
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let result = state.auth_service.login(&req.email, &req.password).await?;
    Ok(Json(LoginResponse::from(result)))
}

/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RefreshRequest>,
) -> Result<Json<TokenPair>, AppError> {
    let tokens = state.auth_service.refresh(&req.refresh_token).await?;
    Ok(Json(tokens))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    state.auth_service.logout(&auth).await?;
    Ok(Json(MessageResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// GET /auth/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<SessionUser>, AppError> {
    let profile = state.auth_service.profile(&auth).await?;
    Ok(Json(SessionUser::from(profile)))
}
