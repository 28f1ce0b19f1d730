//! Route handlers organized by domain.

pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod health;
pub mod users;
