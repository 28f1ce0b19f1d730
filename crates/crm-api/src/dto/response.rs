//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crm_auth::jwt::TokenPair;
use crm_core::types::{TenantId, UserId};
use crm_entity::user::{User, UserRole};
use crm_service::{LoginResult, Profile};

/// Login response: the token pair plus the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
    /// User info.
    pub user: SessionUser,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        let TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        } = result.tokens;

        Self {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
            user: SessionUser::new(result.user, result.tenant_name),
        }
    }
}

/// The signed-in user with the tenant's display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Role.
    pub role: UserRole,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Tenant display name.
    pub tenant_name: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl SessionUser {
    fn new(user: User, tenant_name: String) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            tenant_id: user.tenant_id,
            tenant_name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<Profile> for SessionUser {
    fn from(profile: Profile) -> Self {
        Self::new(profile.user, profile.tenant_name)
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` when the process is serving.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since the state was built.
    pub uptime_seconds: u64,
}

/// Liveness plus backing store status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since the state was built.
    pub uptime_seconds: u64,
    /// Database status.
    pub database: DatabaseHealth,
}

/// Database section of the detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseHealth {
    /// `postgres` or `memory`.
    pub provider: String,
    /// `connected` or `unavailable`.
    pub status: String,
}
