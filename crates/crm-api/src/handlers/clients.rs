//! Client management handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use crm_core::error::AppError;
use crm_entity::client::{Client, ClientFilter};
use crm_service::client::{CreateClientRequest, UpdateClientRequest};

use crate::dto::request::ClientListQuery;
use crate::extractors::{ApiJson, AuthUser, ClientPath};
use crate::state::AppState;

/// GET /clients
pub async fn list_clients(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ClientListQuery>,
) -> Result<Json<Vec<Client>>, AppError> {
    let filter = ClientFilter::from(query);
    let clients = state.client_service.list_clients(&auth, &filter).await?;
    Ok(Json(clients))
}

/// POST /clients
pub async fn create_client(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateClientRequest>,
) -> Result<(StatusCode, Json<Client>), AppError> {
    let client = state.client_service.create_client(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    auth: AuthUser,
    ClientPath(id): ClientPath,
) -> Result<Json<Client>, AppError> {
    let client = state.client_service.get_client(&auth, id).await?;
    Ok(Json(client))
}

/// PATCH /clients/{id}
pub async fn update_client(
    State(state): State<AppState>,
    auth: AuthUser,
    ClientPath(id): ClientPath,
    ApiJson(req): ApiJson<UpdateClientRequest>,
) -> Result<Json<Client>, AppError> {
    let client = state.client_service.update_client(&auth, id, req).await?;
    Ok(Json(client))
}

/// DELETE /clients/{id}
pub async fn delete_client(
    State(state): State<AppState>,
    auth: AuthUser,
    ClientPath(id): ClientPath,
) -> Result<StatusCode, AppError> {
    state.client_service.delete_client(&auth, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
