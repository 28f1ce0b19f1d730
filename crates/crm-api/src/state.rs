//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use crm_auth::jwt::JwtDecoder;
use crm_core::config::AppConfig;
use crm_database::Repositories;
use crm_service::{AuthService, ClientService, DashboardService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Repositories for the configured provider
    pub repos: Repositories,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Login, refresh, logout and profile
    pub auth_service: Arc<AuthService>,
    /// User management within a tenant
    pub user_service: Arc<UserService>,
    /// Client management within a tenant
    pub client_service: Arc<ClientService>,
    /// Dashboard aggregates
    pub dashboard_service: Arc<DashboardService>,

    /// Process start, for the health endpoint
    pub started_at: Instant,
}
