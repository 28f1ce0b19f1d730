//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crm_core::config::AuthConfig;
use crm_core::error::AppError;
use crm_entity::user::User;

use super::claims::{Claims, TokenType};

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    issuer: Option<String>,
    access_ttl: TimeDelta,
    refresh_ttl: TimeDelta,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let (Some(access_ttl), Some(refresh_ttl)) = (config.access_ttl(), config.refresh_ttl())
        else {
            return Err(AppError::configuration("Token TTLs are out of range"));
        };
        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: Some(config.jwt_issuer.clone()).filter(|i| !i.is_empty()),
            access_ttl,
            refresh_ttl,
        })
    }

    /// Generates a new access + refresh token pair for the given user.
    pub fn generate_token_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        let (Some(access_expires_at), Some(refresh_expires_at)) = (
            now.checked_add_signed(self.access_ttl),
            now.checked_add_signed(self.refresh_ttl),
        ) else {
            return Err(AppError::internal("Token expiry is out of range"));
        };

        let access_token = self.sign(&self.claims(user, TokenType::Access, now, access_expires_at))?;
        let refresh_token =
            self.sign(&self.claims(user, TokenType::Refresh, now, refresh_expires_at))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Signs an arbitrary claims set with this encoder's key.
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }

    fn claims(
        &self,
        user: &User,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Claims {
        Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            tenant_id: user.tenant_id.clone(),
            iss: self.issuer.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
            token_type,
        }
    }
}
