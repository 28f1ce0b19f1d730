//! Refresh-token fingerprints.
//!
//! The user row stores only the SHA-256 of the refresh token it last
//! issued, never the token itself.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of a token.
pub fn fingerprint(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
