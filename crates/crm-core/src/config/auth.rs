//! Authentication configuration.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Placeholder secret shipped in `config/default.toml`.
pub const PLACEHOLDER_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Token and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    pub jwt_secret: String,
    /// Expected `iss` claim. Empty disables issuer checks.
    pub jwt_issuer: String,
    /// Access token TTL in minutes.
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    pub refresh_ttl_hours: u64,
    /// Minimum password length.
    pub password_min_length: usize,
    /// Argon2 memory cost in KiB.
    pub argon2_memory_kib: u32,
    /// Argon2 iteration count.
    pub argon2_iterations: u32,
    /// Argon2 lanes.
    pub argon2_parallelism: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: PLACEHOLDER_SECRET.to_string(),
            jwt_issuer: "tenant-crm".to_string(),
            access_ttl_minutes: 60,
            refresh_ttl_hours: 168,
            password_min_length: 6,
            argon2_memory_kib: 19_456,
            argon2_iterations: 2,
            argon2_parallelism: 1,
        }
    }
}

impl AuthConfig {
    /// Access token TTL, `None` when it does not fit a [`TimeDelta`].
    pub fn access_ttl(&self) -> Option<TimeDelta> {
        ttl(self.access_ttl_minutes, 60)
    }

    /// Refresh token TTL, `None` when it does not fit a [`TimeDelta`].
    pub fn refresh_ttl(&self) -> Option<TimeDelta> {
        ttl(self.refresh_ttl_hours, 3600)
    }
}

fn ttl(amount: u64, unit_seconds: u64) -> Option<TimeDelta> {
    let seconds = i64::try_from(amount.checked_mul(unit_seconds)?).ok()?;
    TimeDelta::try_seconds(seconds)
}
