//! Application builder: wires state, router and middleware into an Axum
//! app and runs it.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;

use crm_auth::jwt::{JwtDecoder, JwtEncoder};
use crm_auth::password::{PasswordHasher, PasswordValidator};
use crm_auth::rbac::RbacEnforcer;
use crm_core::config::AppConfig;
use crm_core::error::AppError;
use crm_database::Repositories;
use crm_database::migration::run_migrations;
use crm_service::{AuthService, ClientService, DashboardService, DemoSeeder, UserService};

use crate::router::build_router;
use crate::state::AppState;

/// Connects the configured store, applies migrations and seeds demo data
/// as configured.
pub async fn prepare_repositories(config: &AppConfig) -> Result<Repositories, AppError> {
    // ── Step 1: Connect ──────────────────────────────────────────
    let repos = Repositories::connect(&config.database).await?;

    // ── Step 2: Migrations ───────────────────────────────────────
    if let Some(pool) = repos.pool()
        && config.database.run_migrations
    {
        run_migrations(pool.pool()).await?;
    }

    // ── Step 3: Demo data ────────────────────────────────────────
    if config.database.seed_demo_data {
        let seeder = DemoSeeder::new(
            Arc::clone(&repos.users),
            Arc::clone(&repos.clients),
            Arc::new(PasswordHasher::new(&config.auth)?),
        );
        let report = seeder.run(false).await?;
        tracing::info!(
            users = report.users,
            clients = report.clients,
            skipped = report.skipped,
            "Demo seed finished"
        );
    }

    Ok(repos)
}

/// Builds services and shared state over the given repositories.
pub fn build_state(config: AppConfig, repos: Repositories) -> Result<AppState, AppError> {
    let password_hasher = Arc::new(PasswordHasher::new(&config.auth)?);
    let password_validator = Arc::new(PasswordValidator::new(&config.auth));
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth)?);
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
    let rbac = Arc::new(RbacEnforcer::new());
    let tenants = Arc::new(config.tenants.clone());

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&repos.users),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        Arc::clone(&password_hasher),
        tenants,
    ));
    let user_service = Arc::new(UserService::new(
        Arc::clone(&repos.users),
        password_hasher,
        password_validator,
        Arc::clone(&rbac),
    ));
    let client_service = Arc::new(ClientService::new(
        Arc::clone(&repos.clients),
        Arc::clone(&rbac),
    ));
    let dashboard_service = Arc::new(DashboardService::new(Arc::clone(&repos.clients), rbac));

    Ok(AppState {
        config: Arc::new(config),
        repos,
        jwt_decoder,
        auth_service,
        user_service,
        client_service,
        dashboard_service,
        started_at: Instant::now(),
    })
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the HTTP server until Ctrl-C or SIGTERM.
pub async fn run_server(config: AppConfig, repos: Repositories) -> Result<(), AppError> {
    let addr = config.server.bind_address();
    let state = build_state(config, repos.clone())?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(address = %addr, provider = repos.provider_name(), "CRM server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Server stopped, closing database connections");
    repos.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
