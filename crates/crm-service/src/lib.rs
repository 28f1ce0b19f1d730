//! # crm-service
//!
//! Business logic for the tenant CRM. Every operation takes a
//! [`RequestContext`] built from a verified access token, checks the RBAC
//! permission it needs, and passes the context's tenant to the
//! repositories so no query can reach another tenant's rows.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod client;
pub mod context;
pub mod dashboard;
pub mod seed;
pub mod user;
pub mod validation;

pub use auth::{AuthService, LoginResult, Profile};
pub use client::ClientService;
pub use context::RequestContext;
pub use dashboard::DashboardService;
pub use seed::{DemoSeeder, SeedReport};
pub use user::UserService;
