//! User management handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crm_core::error::AppError;
use crm_entity::user::User;
use crm_service::user::{CreateUserRequest, UpdateUserRequest};

use crate::extractors::{ApiJson, AuthUser, UserPath};
use crate::state::AppState;

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<User>>, AppError> {
    let users = state.user_service.list_users(&auth).await?;
    Ok(Json(users))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.user_service.create_user(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    UserPath(id): UserPath,
) -> Result<Json<User>, AppError> {
    let user = state.user_service.get_user(&auth, id).await?;
    Ok(Json(user))
}

/// PATCH /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    UserPath(id): UserPath,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> Result<Json<User>, AppError> {
    let user = state.user_service.update_user(&auth, id, req).await?;
    Ok(Json(user))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    UserPath(id): UserPath,
) -> Result<StatusCode, AppError> {
    state.user_service.delete_user(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
