//! PostgreSQL repository implementations.

pub mod client;
pub mod user;

pub use client::ClientRepository;
pub use user::UserRepository;

use crm_core::error::{AppError, ErrorKind};

/// Map a sqlx error, turning unique-index violations into conflicts.
///
/// `conflict` receives the violated index name.
pub(crate) fn map_db_error(
    context: &'static str,
    conflict: fn(Option<&str>) -> &'static str,
) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(conflict(db.constraint()));
        }
        AppError::with_source(ErrorKind::Database, context, e)
    }
}

/// Escape `LIKE` metacharacters and wrap the term for a substring match.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
