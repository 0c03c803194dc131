//! Identity token newtype.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic identity token for a catalog entry.
///
/// A token is the first 16 hex characters (64 bits) of the SHA-256 digest of
/// the normalized name and address, concatenated without a separator. Tokens
/// are stable across calls and process restarts, but are **not** guaranteed
/// collision-free: the 64-bit truncation accepts a bounded collision
/// probability, which is acceptable for catalog sizes in the tens of
/// thousands.
///
/// Tokens are produced by [`crate::identity::IdentityHasher`]; this type just
/// carries them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityToken(String);

impl IdentityToken {
    /// Creates a token from an existing string.
    ///
    /// No validation is performed; use [`crate::identity::IdentityHasher`] to
    /// derive tokens from raw name/address pairs.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for IdentityToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for IdentityToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
