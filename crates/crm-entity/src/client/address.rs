//! Postal address stored as JSON on the client row.

use serde::{Deserialize, Serialize};

/// A client's address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    /// Street name.
    pub street: String,
    /// Neighborhood / district.
    pub neighborhood: String,
    /// House number (free-form, e.g. "12B").
    pub number: String,
    /// State / province.
    pub state: String,
}

impl Address {
    /// Names of the fields that are blank.
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("street", &self.street),
            ("neighborhood", &self.neighborhood),
            ("number", &self.number),
            ("state", &self.state),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}
