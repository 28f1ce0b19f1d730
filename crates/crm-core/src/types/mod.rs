//! Core type definitions used across the CRM workspace.

pub mod id;
pub mod response;
pub mod tenant;

pub use id::*;
pub use response::ApiErrorResponse;
pub use tenant::TenantId;
