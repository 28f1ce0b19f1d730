//! Postgres connection pool.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::info;

use crm_core::config::DatabaseConfig;
use crm_core::error::{AppError, ErrorKind};

/// Shared Postgres pool used by the repositories.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Connects using the pool sizes and timeouts from configuration.
    ///
    /// A URL that does not parse is a configuration error; a server that
    /// cannot be reached is a database error.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let masked = mask_password(&config.url);
        let options = PgConnectOptions::from_str(&config.url).map_err(|e| {
            AppError::configuration(format!("Invalid database.url '{masked}': {e}"))
        })?;

        info!(
            url = %masked,
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = Self::pool_options(config)
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to connect to database at {masked}"),
                    e,
                )
            })?;

        info!(url = %masked, "Connected to PostgreSQL");
        Ok(Self { pool })
    }

    fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections.min(config.max_connections))
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_seconds)))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trips `SELECT 1`.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        let one: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))?;
        Ok(one == 1)
    }

    /// Waits for checked-out connections to return, then closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Mask the password portion of a database URL before it is logged.
pub fn mask_password(url: &str) -> String {
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    match url[scheme_end..at_pos].find(':') {
        Some(offset) => {
            let colon_pos = scheme_end + offset;
            format!("{}:****@{}", &url[..colon_pos], &url[at_pos + 1..])
        }
        None => url.to_string(),
    }
}
