//! JWT claims carried by access and refresh tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crm_core::types::{TenantId, UserId};
use crm_entity::user::UserRole;

/// JWT claims payload.
///
/// The tenant id travels inside the signed token; it is the only source
/// of the tenant a request acts on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID.
    pub sub: UserId,
    /// Email at the time of issuance.
    pub email: String,
    /// User role at the time of issuance.
    pub role: UserRole,
    /// Tenant the user belongs to.
    #[serde(rename = "tenantId")]
    pub tenant_id: TenantId,
    /// Issuer, when configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token id.
    pub jti: Uuid,
    /// Token type: "access" or "refresh".
    pub token_type: TokenType,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived token for API requests.
    Access,
    /// Long-lived token for obtaining a new pair.
    Refresh,
}
