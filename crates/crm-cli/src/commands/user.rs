//! User management CLI commands.

use std::sync::Arc;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use crm_auth::password::PasswordValidator;
use crm_auth::rbac::RbacEnforcer;
use crm_core::error::AppError;
use crm_core::types::TenantId;
use crm_entity::user::{User, UserRole};
use crm_service::user::CreateUserRequest;
use crm_service::{RequestContext, UserService};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List the users of a tenant
    List {
        /// Tenant id, e.g. tenant-1
        #[arg(short, long)]
        tenant: String,
    },
    /// Create a user; the password is prompted for
    Create {
        /// Tenant id, e.g. tenant-1
        #[arg(short, long)]
        tenant: String,
        /// Role: ADMIN, USER or GUEST
        #[arg(short, long, default_value = "USER")]
        role: UserRole,
        /// Display name
        #[arg(long)]
        name: String,
        /// Login email
        #[arg(long)]
        email: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Name
    name: String,
    /// Email
    email: String,
    /// Role
    role: String,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name.clone(),
            email: u.email.clone(),
            role: u.role.to_string(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let repos = super::connect(&config).await?;
    let service = UserService::new(
        Arc::clone(&repos.users),
        super::password_hasher(&config)?,
        Arc::new(PasswordValidator::new(&config.auth)),
        Arc::new(RbacEnforcer::new()),
    );

    match &args.command {
        UserCommand::List { tenant } => {
            let ctx = RequestContext::system(TenantId::new(tenant.as_str()));
            let users = service.list_users(&ctx).await?;
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }
        UserCommand::Create {
            tenant,
            role,
            name,
            email,
        } => {
            let password = dialoguer::Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()
                .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

            let ctx = RequestContext::system(TenantId::new(tenant.as_str()));
            let user = service
                .create_user(
                    &ctx,
                    CreateUserRequest {
                        name: name.clone(),
                        email: email.clone(),
                        password,
                        role: Some(*role),
                    },
                )
                .await?;

            if format == OutputFormat::Json {
                output::print_item(&user, format);
            } else {
                output::print_success(&format!(
                    "User '{}' created in {} with role {} (id {})",
                    user.email, user.tenant_id, user.role, user.id
                ));
            }
        }
    }

    repos.close().await;
    Ok(())
}
