//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crm_core::config::AuthConfig;
use crm_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Validates JWT tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock skew
        if !config.jwt_issuer.is_empty() {
            validation.set_issuer(&[config.jwt_issuer.as_str()]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    ///
    /// Checks the signature, expiry, issuer, and that the token is an
    /// access token rather than a refresh token.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::Access)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::Refresh)
    }

    fn decode_typed(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != expected {
            return Err(AppError::authentication(format!(
                "Invalid token type: expected {expected:?} token"
            )));
        }
        if claims.tenant_id.is_empty() {
            return Err(AppError::authentication("Token carries no tenant"));
        }

        Ok(claims)
    }

    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}
