//! # crm-entity
//!
//! Domain entity models for the tenant CRM. Every struct in this crate is
//! either a database row (deriving `sqlx::FromRow`) or the input used to
//! create or change one. Tenant-owned rows always carry a `tenant_id`.

pub mod client;
pub mod user;
