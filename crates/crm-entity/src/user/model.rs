//! User entity model.

use chrono::{DateTime, Utc};
use crm_core::types::{TenantId, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::UserRole;

/// A user account. Belongs to exactly one tenant.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email, unique across all tenants (case-insensitive).
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// User role (RBAC).
    pub role: UserRole,
    /// SHA-256 fingerprint of the currently valid refresh token.
    #[serde(skip_serializing, default)]
    pub refresh_token_hash: Option<String>,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the given fingerprint matches the stored refresh token.
    pub fn holds_refresh_token(&self, fingerprint: &str) -> bool {
        self.refresh_token_hash.as_deref() == Some(fingerprint)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
    /// Owning tenant, taken from the acting principal.
    pub tenant_id: TenantId,
}

/// Partial update of a user. `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    /// New display name.
    pub name: Option<String>,
    /// New login email.
    pub email: Option<String>,
    /// New pre-hashed password.
    pub password_hash: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
}

impl UpdateUser {
    /// Apply the changes to an in-memory copy of the row.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(hash) = &self.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        user.updated_at = Utc::now();
    }
}
