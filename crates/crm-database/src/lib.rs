//! # crm-database
//!
//! PostgreSQL connection management, migrations, and the tenant-scoped
//! repositories for users and clients. An in-memory provider implements
//! the same traits for development and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use provider::Repositories;
pub use store::{ClientStore, UserStore};
