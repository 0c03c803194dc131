//! Catalog store trait.

use crate::Result;
use crate::models::{CourseRecord, IdentityToken};
use std::collections::HashSet;

/// Interface to the catalog persistence collaborator.
///
/// The import path deliberately uses one bulk token lookup per batch instead
/// of one existence query per candidate; implementations should make
/// [`load_known_tokens`](Self::load_known_tokens) a single round-trip.
pub trait CatalogStore: Send + Sync {
    /// Loads the complete set of previously-known identity tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the bulk lookup fails.
    fn load_known_tokens(&self) -> Result<HashSet<IdentityToken>>;

    /// Persists a new catalog entry, deriving its identity token from the
    /// name and address.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be persisted, including when an
    /// entry with the same token already exists.
    fn create_course(
        &self,
        name: &str,
        address: &str,
        payload: &str,
        owner_id: Option<u64>,
    ) -> Result<CourseRecord>;
}
