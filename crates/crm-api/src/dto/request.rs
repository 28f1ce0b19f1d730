//! Request DTOs.

use serde::{Deserialize, Serialize};

use crm_entity::client::ClientFilter;

/// `POST /auth/login` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

/// `POST /auth/refresh` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// The refresh token issued by login or the previous refresh.
    pub refresh_token: String,
}

/// `GET /clients` query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientListQuery {
    /// Case-insensitive match on name, email or public id.
    pub search: Option<String>,
    /// Only active (`true`) or inactive (`false`) clients.
    pub active: Option<bool>,
}

impl From<ClientListQuery> for ClientFilter {
    fn from(query: ClientListQuery) -> Self {
        ClientFilter {
            search: query.search,
            is_active: query.active,
        }
    }
}
