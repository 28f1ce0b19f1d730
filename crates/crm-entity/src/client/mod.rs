//! Client (customer record) domain entities.

pub mod address;
pub mod model;

pub use address::Address;
pub use model::{Client, ClientFilter, ClientStats, NewClient, UpdateClient};
