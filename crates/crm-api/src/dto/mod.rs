//! Request and response bodies owned by the HTTP layer.
//!
//! Resource bodies (users, clients) are the service request types and
//! entity models themselves; only auth, query and health shapes live here.

pub mod request;
pub mod response;
