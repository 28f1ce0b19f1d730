//! Tenant-scoped client management.

pub mod service;

pub use service::{ClientService, CreateClientRequest, UpdateClientRequest};
