//! In-memory repository implementations.
//!
//! Used by the `memory` database provider and by tests. Rows live in a
//! `tokio::sync::RwLock<HashMap<..>>`; uniqueness checks and writes
//! happen under the same write guard.

pub mod client;
pub mod user;

pub use client::MemoryClientStore;
pub use user::MemoryUserStore;

/// Email equality under the same folding as the `LOWER(email)` indexes.
fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
