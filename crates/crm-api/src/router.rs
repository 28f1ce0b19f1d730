//! Route definitions for the CRM HTTP API.
//!
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor. Routes are mounted at the root.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;
    let cors = middleware::cors::build_cors_layer(&server.cors);
    let timeout = Duration::from_secs(server.request_timeout_seconds);
    let body_limit = server.body_limit_bytes;

    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(client_routes())
        .merge(dashboard_routes())
        .merge(health_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: login, refresh, logout, profile
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/profile", get(handlers::auth::profile))
}

/// User management within the caller's tenant
fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::users::get_user)
                .patch(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        )
}

/// Client management within the caller's tenant
fn client_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/clients",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/clients/{id}",
            get(handlers::clients::get_client)
                .patch(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
}

fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard/stats", get(handlers::dashboard::stats))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
