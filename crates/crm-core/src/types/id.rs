//! Uuid newtypes for the entity identifiers.
//!
//! A `ClientId` cannot be passed where a `UserId` is expected. With the
//! `sqlx` feature each type binds and decodes as a Postgres `uuid`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Random v4 identifier for a new row.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Parses untrusted input such as a path segment.
            ///
            /// Failure is a validation error naming the entity.
            pub fn parse(raw: &str) -> Result<Self, AppError> {
                Uuid::parse_str(raw.trim())
                    .map(Self)
                    .map_err(|_| AppError::validation(format!("Invalid {} id: {raw}", $label)))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

uuid_id!(
    /// Primary key of a user account.
    UserId,
    "user"
);

uuid_id!(
    /// Primary key of a client record.
    ClientId,
    "client"
);
