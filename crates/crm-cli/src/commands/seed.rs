//! Demo data seeding.

use std::sync::Arc;

use clap::Args;

use crate::output::{self, OutputFormat};
use crm_core::error::AppError;
use crm_service::DemoSeeder;

/// Arguments for the seed command
#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Delete all users and clients before seeding
    #[arg(long)]
    pub reset: bool,

    /// Skip the confirmation prompt for --reset
    #[arg(long)]
    pub force: bool,
}

/// Execute the seed command
pub async fn execute(
    args: &SeedArgs,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;

    if args.reset && !args.force {
        let confirm = dialoguer::Confirm::new()
            .with_prompt("This will DELETE all users and clients in every tenant. Continue?")
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let repos = super::connect(&config).await?;
    let seeder = DemoSeeder::new(
        Arc::clone(&repos.users),
        Arc::clone(&repos.clients),
        super::password_hasher(&config)?,
    );

    let report = seeder.run(args.reset).await?;
    repos.close().await;

    if format == OutputFormat::Json {
        output::print_item(&report, format);
    } else if report.skipped {
        output::print_warning("Users already exist; nothing seeded. Use --reset to start over.");
    } else {
        output::print_success(&format!(
            "Seeded {} users and {} clients",
            report.users, report.clients
        ));
    }

    Ok(())
}
