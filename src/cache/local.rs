//! In-process cache tier with per-entry TTL.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// A stored value with its expiry deadline.
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached bytes.
    data: Vec<u8>,
    /// Deadline after which the entry is treated as a miss.
    expires_at: Instant,
}

/// Concurrency-safe in-process key/value store with per-entry expiry.
///
/// # Eviction
///
/// TTL eviction is **lazy only**: an expired entry is removed when a `get`
/// next touches it, never by a background sweep. Memory therefore grows
/// until expired keys are read again or removed explicitly; the advisory
/// memory budget from the configuration is accepted but not enforced here.
///
/// # Thread Safety
///
/// Uses `RwLock` for interior mutability, so arbitrary concurrent callers
/// need no external locking. Writes to a key are atomic with respect to
/// reads of the same key; cross-key operations carry no global ordering.
///
/// # Lock Poisoning
///
/// Lock poisoning is handled with fail-open semantics: a poisoned lock makes
/// reads report a miss and writes become no-ops. The cache is derived data,
/// so serving a miss is always safe, and blocking every caller over a panic
/// in one thread would be worse.
pub struct LocalCacheStore {
    /// Backing map, keyed by caller-supplied strings.
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl LocalCacheStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Stores a value under `key`, unconditionally overwriting any previous
    /// entry, expiring after `ttl`.
    pub fn set(&self, key: &str, value: &[u8], ttl: Duration) {
        let entry = CacheEntry {
            data: value.to_vec(),
            expires_at: Instant::now() + ttl,
        };

        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), entry);
            metrics::gauge!("cache_local_items").set(entries.len() as f64);
        }
    }

    /// Retrieves the value stored under `key`.
    ///
    /// Returns `None` on a miss. An entry whose deadline has passed is
    /// removed and reported as a miss (lazy eviction).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let expired = {
            let entries = self.entries.read().ok()?;
            match entries.get(key) {
                Some(entry) if Instant::now() < entry.expires_at => {
                    return Some(entry.data.clone());
                },
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            // Re-check under the write lock: another writer may have
            // replaced the entry since the read lock was released.
            if let Ok(mut entries) = self.entries.write() {
                if let Some(entry) = entries.get(key) {
                    if Instant::now() >= entry.expires_at {
                        entries.remove(key);
                        metrics::gauge!("cache_local_items").set(entries.len() as f64);
                        tracing::debug!(key, "evicted expired cache entry");
                    } else {
                        return Some(entry.data.clone());
                    }
                }
            }
        }

        None
    }

    /// Removes the entry stored under `key`, if any.
    pub fn delete(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
            metrics::gauge!("cache_local_items").set(entries.len() as f64);
        }
    }

    /// Removes every entry whose key starts with the prefix of `pattern`.
    ///
    /// Only a single trailing `*` wildcard is supported ("course:*"). A
    /// pattern without a trailing `*` removes nothing; mid-string wildcards
    /// are not interpreted.
    pub fn delete_pattern(&self, pattern: &str) {
        let Some(prefix) = pattern.strip_suffix('*') else {
            return;
        };

        if let Ok(mut entries) = self.entries.write() {
            entries.retain(|key, _| !key.starts_with(prefix));
            metrics::gauge!("cache_local_items").set(entries.len() as f64);
        }
    }

    /// Removes all entries.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
            metrics::gauge!("cache_local_items").set(0.0);
        }
    }

    /// Returns the current entry count.
    ///
    /// May include expired entries that have not been read (and therefore
    /// not lazily evicted) yet.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }
}

impl Default for LocalCacheStore {
    fn default() -> Self {
        Self::new()
    }
}
