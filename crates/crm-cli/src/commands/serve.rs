//! Start the CRM server.

use clap::Args;

use crm_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: Option<&str>) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    println!("Starting CRM server...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);

    let repos = crm_api::prepare_repositories(&config).await?;
    crm_api::run_server(config, repos).await
}
