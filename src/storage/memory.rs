//! In-memory catalog store.

use super::traits::CatalogStore;
use crate::identity::IdentityHasher;
use crate::models::{CourseRecord, IdentityToken};
use crate::{Error, Result};
use std::collections::HashSet;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Thread-safe in-memory catalog store.
///
/// Derives the identity token at create time (the same behavior the real
/// store implements as a create hook) and enforces token uniqueness the way
/// the database's unique index would. Used by the CLI's validation runs,
/// where a feed is deduplicated and tallied without touching a database,
/// and by tests.
pub struct MemoryCatalogStore {
    /// Stored records.
    records: RwLock<Vec<CourseRecord>>,
    /// Next record id.
    next_id: AtomicU64,
}

impl MemoryCatalogStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Returns a copy of all stored records.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing lock is poisoned.
    pub fn records(&self) -> Result<Vec<CourseRecord>> {
        self.records
            .read()
            .map(|records| records.clone())
            .map_err(|e| Error::OperationFailed {
                operation: "memory_store_read".to_string(),
                cause: e.to_string(),
            })
    }
}

impl Default for MemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn load_known_tokens(&self) -> Result<HashSet<IdentityToken>> {
        self.records
            .read()
            .map(|records| records.iter().map(|r| r.token.clone()).collect())
            .map_err(|e| Error::OperationFailed {
                operation: "memory_store_load_tokens".to_string(),
                cause: e.to_string(),
            })
    }

    fn create_course(
        &self,
        name: &str,
        address: &str,
        payload: &str,
        owner_id: Option<u64>,
    ) -> Result<CourseRecord> {
        let token = IdentityHasher::hash(name, address);

        let mut records = self.records.write().map_err(|e| Error::OperationFailed {
            operation: "memory_store_create".to_string(),
            cause: e.to_string(),
        })?;

        // Emulates the unique index on the token column.
        if records.iter().any(|r| r.token == token) {
            return Err(Error::OperationFailed {
                operation: "memory_store_create".to_string(),
                cause: format!("duplicate token {token}"),
            });
        }

        let record = CourseRecord {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            name: name.to_string(),
            address: address.to_string(),
            token,
            payload: payload.to_string(),
            owner_id,
            created_at: unix_timestamp(),
        };
        records.push(record.clone());
        Ok(record)
    }
}

/// Current Unix timestamp in seconds, 0 if the clock is before the epoch.
fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
