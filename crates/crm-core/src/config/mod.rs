//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! `config/default.toml`, an environment overlay, and `CRM_*` environment
//! variables. Every section has defaults, so an empty source set still
//! yields a usable configuration.

pub mod auth;
pub mod database;
pub mod logging;
pub mod server;
pub mod tenants;

use serde::{Deserialize, Serialize};

pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, DatabaseProvider};
pub use self::logging::LoggingConfig;
pub use self::server::{CorsConfig, ServerConfig};
pub use self::tenants::TenantsConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Token and password settings.
    pub auth: AuthConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Tenant display names.
    pub tenants: TenantsConfig,
}

impl AppConfig {
    /// Load configuration from `config/default.toml`, `config/{env}.toml`
    /// and environment variables such as `CRM_AUTH__JWT_SECRET`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::build(
            config::Config::builder()
                .add_source(config::File::with_name("config/default").required(false))
                .add_source(config::File::with_name(&format!("config/{env}")).required(false)),
        )
    }

    /// Load configuration from an explicit file plus environment variables.
    pub fn load_from(path: &str) -> Result<Self, AppError> {
        Self::build(
            config::Config::builder().add_source(config::File::with_name(path).required(true)),
        )
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config = builder
            .add_source(
                config::Environment::with_prefix("CRM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.auth.jwt_secret == auth::PLACEHOLDER_SECRET {
            tracing::warn!("auth.jwt_secret is the shipped placeholder; set CRM_AUTH__JWT_SECRET");
        }
        if self.auth.access_ttl_minutes == 0 || self.auth.refresh_ttl_hours == 0 {
            return Err(AppError::configuration("Token TTLs must be greater than zero"));
        }
        let (Some(access_ttl), Some(refresh_ttl)) = (self.auth.access_ttl(), self.auth.refresh_ttl())
        else {
            return Err(AppError::configuration("Token TTLs are out of range"));
        };
        if chrono::Utc::now().checked_add_signed(refresh_ttl).is_none() {
            return Err(AppError::configuration(
                "auth.refresh_ttl_hours puts token expiry past the supported date range",
            ));
        }
        if access_ttl >= refresh_ttl {
            return Err(AppError::configuration(
                "auth.access_ttl_minutes must be shorter than auth.refresh_ttl_hours",
            ));
        }
        if self.auth.password_min_length == 0 {
            return Err(AppError::configuration(
                "auth.password_min_length must be at least 1",
            ));
        }
        if self.database.provider == DatabaseProvider::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required for the postgres provider",
            ));
        }
        Ok(())
    }

    /// Display name for a tenant.
    pub fn tenant_name(&self, tenant_id: &str) -> String {
        self.tenants.display_name(tenant_id)
    }
}
