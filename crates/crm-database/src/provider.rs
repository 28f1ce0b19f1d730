//! Repository set that dispatches to the configured provider.

use std::sync::Arc;

use tracing::info;

use crm_core::config::{DatabaseConfig, DatabaseProvider};
use crm_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryClientStore, MemoryUserStore};
use crate::repositories::{ClientRepository, UserRepository};
use crate::store::{ClientStore, UserStore};

/// The repositories used by the services.
///
/// The provider is selected at construction time from configuration.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// User accounts.
    pub users: Arc<dyn UserStore>,
    /// Client records.
    pub clients: Arc<dyn ClientStore>,
    /// Postgres pool, absent for the in-memory provider.
    pool: Option<DatabasePool>,
}

impl Repositories {
    /// Build the repositories for the configured provider.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                Ok(Self::postgres(pool))
            }
            DatabaseProvider::Memory => {
                info!("Initializing in-memory repositories");
                Ok(Self::in_memory())
            }
        }
    }

    /// Postgres repositories over an existing pool.
    pub fn postgres(pool: DatabasePool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.pool().clone())),
            clients: Arc::new(ClientRepository::new(pool.pool().clone())),
            pool: Some(pool),
        }
    }

    /// Fresh, empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::new()),
            clients: Arc::new(MemoryClientStore::new()),
            pool: None,
        }
    }

    /// The Postgres pool, if this is the Postgres provider.
    pub fn pool(&self) -> Option<&DatabasePool> {
        self.pool.as_ref()
    }

    /// Provider name for logs and health output.
    pub fn provider_name(&self) -> &'static str {
        if self.pool.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }

    /// Check that the backing store answers.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Close the pool, if any.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}
