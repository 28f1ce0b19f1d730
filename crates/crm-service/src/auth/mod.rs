//! Login, token refresh, logout, and profile.

pub mod service;

pub use service::{AuthService, LoginResult, Profile};
