//! Tenant overview.

use std::collections::BTreeMap;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use crm_core::error::AppError;

/// Arguments for tenant commands
#[derive(Debug, Args)]
pub struct TenantArgs {
    /// Tenant subcommand
    #[command(subcommand)]
    pub command: TenantCommand,
}

/// Tenant subcommands
#[derive(Debug, Subcommand)]
pub enum TenantCommand {
    /// List configured tenants and tenants that own users
    List,
}

#[derive(Debug, Serialize, Tabled)]
struct TenantRow {
    id: String,
    name: String,
    users: i64,
}

/// Execute tenant commands
pub async fn execute(
    args: &TenantArgs,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;

    match &args.command {
        TenantCommand::List => {
            let repos = super::connect(&config).await?;

            let mut users: BTreeMap<String, i64> = config
                .tenants
                .names
                .keys()
                .map(|id| (id.clone(), 0))
                .collect();
            for (tenant, count) in repos.users.count_by_tenant().await? {
                users.insert(tenant.to_string(), count);
            }
            repos.close().await;

            let rows: Vec<TenantRow> = users
                .into_iter()
                .map(|(id, users)| TenantRow {
                    name: config.tenant_name(&id),
                    id,
                    users,
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
