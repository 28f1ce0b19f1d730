//! Typed `{id}` path parameters.
//!
//! A malformed id is a 400, not a 404, so callers can tell a typo from a
//! record that does not exist in their tenant.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crm_core::error::AppError;
use crm_core::types::{ClientId, UserId};

async fn id_segment<S: Send + Sync>(parts: &mut Parts, state: &S) -> Result<String, AppError> {
    let Path(raw) = Path::<String>::from_request_parts(parts, state)
        .await
        .map_err(|e| AppError::validation(format!("Invalid path: {}", e.body_text())))?;
    Ok(raw)
}

/// `{id}` segment of a `/users/{id}` route.
#[derive(Debug, Clone, Copy)]
pub struct UserPath(pub UserId);

impl<S: Send + Sync> FromRequestParts<S> for UserPath {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        UserId::parse(&id_segment(parts, state).await?).map(Self)
    }
}

/// `{id}` segment of a `/clients/{id}` route.
#[derive(Debug, Clone, Copy)]
pub struct ClientPath(pub ClientId);

impl<S: Send + Sync> FromRequestParts<S> for ClientPath {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        ClientId::parse(&id_segment(parts, state).await?).map(Self)
    }
}
