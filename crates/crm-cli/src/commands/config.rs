//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use crm_core::config::{AppConfig, auth::PLACEHOLDER_SECRET};
use crm_core::error::AppError;
use crm_database::connection::mask_password;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
    /// Load and validate the configuration
    Check,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = redacted(super::load_config(config_path)?);
            output::print_item(&config, format);
        }
        ConfigCommand::Check => match super::load_config(config_path) {
            Ok(config) => {
                output::print_success("Configuration is valid");
                output::print_kv("server", &config.server.bind_address());
                output::print_kv(
                    "database",
                    &format!(
                        "{:?} {}",
                        config.database.provider,
                        mask_password(&config.database.url)
                    ),
                );
                output::print_kv("tenants", &config.tenants.names.len().to_string());
                if config.auth.jwt_secret == PLACEHOLDER_SECRET {
                    output::print_warning("auth.jwt_secret is the shipped placeholder");
                }
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}

fn redacted(mut config: AppConfig) -> AppConfig {
    config.auth.jwt_secret = "****".to_string();
    config.database.url = mask_password(&config.database.url);
    config
}
