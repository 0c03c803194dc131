//! Catalog record model.

use super::IdentityToken;
use serde::{Deserialize, Serialize};

/// A persisted catalog entry.
///
/// The `token` is derived from `name` and `address` at create time by the
/// catalog store, mirroring the persistence layer's create hook. The
/// `payload` is an opaque JSON blob carried through unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Store-assigned identifier.
    pub id: u64,
    /// Course name as supplied by the import source.
    pub name: String,
    /// Course address as supplied by the import source.
    pub address: String,
    /// Deterministic identity token for duplicate detection.
    pub token: IdentityToken,
    /// Opaque JSON payload (scraper output, course data, ...).
    pub payload: String,
    /// Optional owning user.
    pub owner_id: Option<u64>,
    /// Creation time, seconds since the Unix epoch.
    pub created_at: u64,
}
