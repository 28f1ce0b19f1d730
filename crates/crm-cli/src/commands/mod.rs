//! CLI command definitions and dispatch.

pub mod config;
pub mod migrate;
pub mod seed;
pub mod serve;
pub mod tenant;
pub mod user;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::{self, OutputFormat};
use crm_auth::password::PasswordHasher;
use crm_core::config::{AppConfig, DatabaseProvider};
use crm_core::error::AppError;
use crm_database::Repositories;

/// Tenant CRM administration
#[derive(Debug, Parser)]
#[command(name = "crm", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (defaults to config/default + config/$CRM_ENV)
    #[arg(short, long, env = "CRM_CONFIG")]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Load the demo dataset
    Seed(seed::SeedArgs),
    /// User management
    User(user::UserArgs),
    /// Tenant overview
    Tenant(tenant::TenantArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.config.as_deref();
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, config).await,
            Commands::Seed(args) => seed::execute(args, config, self.format).await,
            Commands::User(args) => user::execute(args, config, self.format).await,
            Commands::Tenant(args) => tenant::execute(args, config, self.format).await,
            Commands::Config(args) => config::execute(args, config, self.format).await,
        }
    }
}

/// Helper: load configuration from an explicit file or the layered defaults
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, AppError> {
    match config_path {
        Some(path) => AppConfig::load_from(path),
        None => {
            let env = std::env::var("CRM_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Helper: connect the configured store
pub async fn connect(config: &AppConfig) -> Result<Repositories, AppError> {
    if config.database.provider == DatabaseProvider::Memory {
        output::print_warning("database.provider is 'memory': changes are lost when the command exits");
    }
    Repositories::connect(&config.database).await
}

/// Helper: password hasher with the configured cost
pub fn password_hasher(config: &AppConfig) -> Result<Arc<PasswordHasher>, AppError> {
    Ok(Arc::new(PasswordHasher::new(&config.auth)?))
}
