//! Deterministic identity hashing for catalog entries.

use super::normalize;
use crate::models::IdentityToken;
use sha2::{Digest, Sha256};

/// Number of hex characters kept from the full SHA-256 digest.
///
/// 16 hex characters carry 64 bits. That is not collision-free, but the
/// bounded collision probability is an accepted tradeoff for catalog sizes
/// in the tens of thousands; a collision silently manifests as a false
/// "duplicate" skip during import.
pub const TOKEN_LENGTH: usize = 16;

/// Identity hasher for catalog entries.
///
/// Derives a short deterministic token from a name/address pair. Both inputs
/// are normalized first, so formatting variants of the same entry produce
/// the same token.
///
/// Note the two normalized strings are concatenated **without** a separator
/// before hashing. Different (name, address) splits of the same combined
/// text can therefore collide; changing this would change every existing
/// token, so the behavior is preserved as-is.
///
/// # Example
///
/// ```rust
/// use fairway::identity::IdentityHasher;
///
/// let a = IdentityHasher::hash("Pine Valley Golf Club", "Pine Valley, NJ 08021");
/// let b = IdentityHasher::hash("Pine Valley G.C.", "Pine Valley, NJ 08021");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str().len(), 16);
/// ```
pub struct IdentityHasher;

impl IdentityHasher {
    /// Computes the identity token for a name/address pair.
    ///
    /// Never errors: validation of name/address happens upstream, before
    /// hashing.
    #[must_use]
    pub fn hash(name: &str, address: &str) -> IdentityToken {
        let combined = format!("{}{}", normalize(name), normalize(address));

        let mut hasher = Sha256::new();
        hasher.update(combined.as_bytes());
        let digest = hex::encode(hasher.finalize());

        IdentityToken::new(&digest[..TOKEN_LENGTH])
    }
}
