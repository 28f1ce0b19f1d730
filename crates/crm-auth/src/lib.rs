//! # crm-auth
//!
//! Authentication and authorization primitives for the tenant CRM.
//!
//! ## Modules
//!
//! - `jwt`: access/refresh token issuance, verification, and refresh-token fingerprints
//! - `password`: Argon2id password hashing and policy enforcement
//! - `rbac`: role to permission table and its enforcer

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair, TokenType};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{RbacEnforcer, RbacPolicies, SystemPermission};
