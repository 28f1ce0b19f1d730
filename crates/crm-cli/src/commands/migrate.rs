//! Database migration management commands.

use clap::{Args, Subcommand};

use crate::output;
use crm_core::error::AppError;
use crm_database::migration::run_migrations;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config_path: Option<&str>) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;

    match &args.command {
        MigrateCommand::Run => {
            let repos = super::connect(&config).await?;
            let Some(pool) = repos.pool() else {
                return Err(AppError::configuration(
                    "Migrations require database.provider = \"postgres\"",
                ));
            };

            println!("Running database migrations...");
            run_migrations(pool.pool()).await?;
            repos.close().await;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}
