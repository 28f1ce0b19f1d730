//! Tenant-scoped user management.

pub mod service;

pub use service::{CreateUserRequest, UpdateUserRequest, UserService};
