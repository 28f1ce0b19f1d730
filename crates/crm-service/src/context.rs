//! Request context carrying the authenticated principal and its tenant.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crm_auth::jwt::Claims;
use crm_core::types::{TenantId, UserId};
use crm_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built from verified JWT claims and passed into every service method,
/// so each operation knows who is acting and inside which tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: UserId,
    /// The tenant every query of this request is scoped to.
    pub tenant_id: TenantId,
    /// The user's role at the time the token was issued.
    pub role: UserRole,
    /// The user's email (from the token).
    pub email: String,
    /// IP address of the request origin.
    pub ip_address: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
}

impl RequestContext {
    /// Builds a context from verified access-token claims.
    pub fn from_claims(
        claims: &Claims,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            user_id: claims.sub,
            tenant_id: claims.tenant_id.clone(),
            role: claims.role,
            email: claims.email.clone(),
            ip_address,
            user_agent,
        }
    }

    /// Admin context for operator commands run from the CLI.
    pub fn system(tenant_id: TenantId) -> Self {
        Self {
            user_id: UserId::from_uuid(Uuid::nil()),
            tenant_id,
            role: UserRole::Admin,
            email: "system".to_string(),
            ip_address: None,
            user_agent: Some("crm-cli".to_string()),
        }
    }
}
