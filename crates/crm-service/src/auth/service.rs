//! Token lifecycle: login, refresh with rotation, logout.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crm_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair, fingerprint};
use crm_auth::password::PasswordHasher;
use crm_core::config::TenantsConfig;
use crm_core::error::AppError;
use crm_database::store::UserStore;
use crm_entity::user::User;

use crate::context::RequestContext;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const INVALID_REFRESH_TOKEN: &str = "Invalid refresh token";

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// Generated token pair.
    pub tokens: TokenPair,
    /// The authenticated user.
    pub user: User,
    /// Display name of the user's tenant.
    pub tenant_name: String,
}

/// The current principal's account.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    /// The user row.
    pub user: User,
    /// Display name of the user's tenant.
    pub tenant_name: String,
}

/// Issues, refreshes, and revokes tokens.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
    hasher: Arc<PasswordHasher>,
    tenants: Arc<TenantsConfig>,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Arc<dyn UserStore>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        hasher: Arc<PasswordHasher>,
        tenants: Arc<TenantsConfig>,
    ) -> Self {
        Self {
            users,
            encoder,
            decoder,
            hasher,
            tenants,
        }
    }

    /// Checks credentials and issues a token pair.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let Some(user) = self.users.find_by_email(email.trim()).await? else {
            self.hasher.verify_dummy(password);
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, tenant_id = %user.tenant_id, "Login failed: wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let tokens = self.encoder.generate_token_pair(&user)?;
        self.users
            .set_refresh_token(
                &user.tenant_id,
                user.id,
                Some(&fingerprint(&tokens.refresh_token)),
            )
            .await?;

        info!(user_id = %user.id, tenant_id = %user.tenant_id, role = %user.role, "Login successful");

        let tenant_name = self.tenants.display_name(user.tenant_id.as_str());
        Ok(LoginResult {
            tokens,
            user,
            tenant_name,
        })
    }

    /// Exchanges a refresh token for a new pair.
    ///
    /// The presented token must be the one last issued to the user; the
    /// stored fingerprint is swapped atomically so each refresh token is
    /// redeemable once.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self
            .decoder
            .decode_refresh_token(refresh_token)
            .map_err(|_| AppError::authentication(INVALID_REFRESH_TOKEN))?;

        let user = self
            .users
            .find_by_id(&claims.tenant_id, claims.sub)
            .await?
            .ok_or_else(|| AppError::authentication(INVALID_REFRESH_TOKEN))?;

        let presented = fingerprint(refresh_token);
        if !user.holds_refresh_token(&presented) {
            warn!(user_id = %user.id, "Refresh rejected: token is not the current one");
            return Err(AppError::authentication(INVALID_REFRESH_TOKEN));
        }

        let tokens = self.encoder.generate_token_pair(&user)?;
        let rotated = self
            .users
            .rotate_refresh_token(
                &user.tenant_id,
                user.id,
                &presented,
                &fingerprint(&tokens.refresh_token),
            )
            .await?;

        if !rotated {
            warn!(user_id = %user.id, "Refresh rejected: concurrent rotation");
            return Err(AppError::authentication(INVALID_REFRESH_TOKEN));
        }

        info!(user_id = %user.id, tenant_id = %user.tenant_id, "Tokens refreshed");
        Ok(tokens)
    }

    /// Forgets the stored refresh token so it can no longer be redeemed.
    pub async fn logout(&self, ctx: &RequestContext) -> Result<(), AppError> {
        self.users
            .set_refresh_token(&ctx.tenant_id, ctx.user_id, None)
            .await?;
        info!(
            user_id = %ctx.user_id,
            tenant_id = %ctx.tenant_id,
            ip = ?ctx.ip_address,
            "Logged out"
        );
        Ok(())
    }

    /// Returns the principal's own account.
    pub async fn profile(&self, ctx: &RequestContext) -> Result<Profile, AppError> {
        let user = self
            .users
            .find_by_id(&ctx.tenant_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        Ok(Profile {
            tenant_name: self.tenants.display_name(ctx.tenant_id.as_str()),
            user,
        })
    }
}
