//! # crm-api
//!
//! HTTP layer for the tenant CRM. Handlers stay thin: they extract the
//! authenticated [`extractors::AuthUser`], decode the body, and hand off
//! to the services in `crm-service`, which own RBAC and tenant scoping.

pub mod app;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, prepare_repositories, run_server};
pub use state::AppState;
