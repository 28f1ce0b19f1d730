//! User management within the principal's tenant.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crm_auth::password::{PasswordHasher, PasswordValidator};
use crm_auth::rbac::{RbacEnforcer, SystemPermission};
use crm_core::error::AppError;
use crm_core::types::UserId;
use crm_database::store::UserStore;
use crm_entity::user::{CreateUser, UpdateUser, User, UserRole};

use crate::context::RequestContext;
use crate::validation::{validate_input, validate_name};

/// Request to create a user in the caller's tenant.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name.
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    /// Login email (unique).
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Role, `GUEST` when omitted.
    #[serde(default)]
    pub role: Option<UserRole>,
}

/// Partial user update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New display name.
    #[validate(custom(function = "validate_name"))]
    pub name: Option<String>,
    /// New login email.
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// New password.
    pub password: Option<String>,
    /// New role.
    pub role: Option<UserRole>,
}

/// Handles user management operations.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    rbac: Arc<RbacEnforcer>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            rbac,
        }
    }

    /// Lists the users of the caller's tenant.
    pub async fn list_users(&self, ctx: &RequestContext) -> Result<Vec<User>, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserRead)?;

        self.users.list(&ctx.tenant_id).await
    }

    /// Gets a single user of the caller's tenant.
    pub async fn get_user(&self, ctx: &RequestContext, user_id: UserId) -> Result<User, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserRead)?;

        self.users
            .find_by_id(&ctx.tenant_id, user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Creates a user in the caller's tenant.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        req: CreateUserRequest,
    ) -> Result<User, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserCreate)?;

        validate_input(&req)?;
        self.validator.validate(&req.password)?;
        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .users
            .create(CreateUser {
                name: req.name.trim().to_string(),
                email: req.email.trim().to_string(),
                password_hash,
                role: req.role.unwrap_or_default(),
                tenant_id: ctx.tenant_id.clone(),
            })
            .await?;

        info!(
            actor_id = %ctx.user_id,
            tenant_id = %ctx.tenant_id,
            new_user_id = %user.id,
            role = %user.role,
            "User created"
        );

        Ok(user)
    }

    /// Applies a partial update to a user of the caller's tenant.
    ///
    /// A password change also revokes the user's refresh token.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
        req: UpdateUserRequest,
    ) -> Result<User, AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserUpdate)?;

        validate_input(&req)?;
        let current = self.get_user(ctx, user_id).await?;

        if user_id == ctx.user_id
            && let Some(role) = req.role
            && role != current.role
        {
            return Err(AppError::authorization("Cannot change your own role"));
        }

        let password_hash = match req.password.as_deref() {
            Some(password) => {
                self.validator.validate(password)?;
                Some(self.hasher.hash_password(password)?)
            }
            None => None,
        };
        let password_changed = password_hash.is_some();

        let changes = UpdateUser {
            name: req.name.map(|n| n.trim().to_string()),
            email: req.email.map(|e| e.trim().to_string()),
            password_hash,
            role: req.role,
        };

        let user = self
            .users
            .update(&ctx.tenant_id, user_id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if password_changed {
            self.users
                .set_refresh_token(&ctx.tenant_id, user_id, None)
                .await?;
        }

        info!(
            actor_id = %ctx.user_id,
            tenant_id = %ctx.tenant_id,
            target_id = %user_id,
            password_changed,
            "User updated"
        );

        Ok(user)
    }

    /// Deletes a user of the caller's tenant.
    pub async fn delete_user(&self, ctx: &RequestContext, user_id: UserId) -> Result<(), AppError> {
        self.rbac
            .require_permission(&ctx.role, &SystemPermission::UserDelete)?;

        if user_id == ctx.user_id {
            return Err(AppError::authorization("Cannot delete your own account"));
        }

        if !self.users.delete(&ctx.tenant_id, user_id).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!(
            actor_id = %ctx.user_id,
            tenant_id = %ctx.tenant_id,
            target_id = %user_id,
            ip = ?ctx.ip_address,
            user_agent = ?ctx.user_agent,
            "User deleted"
        );

        Ok(())
    }
}
