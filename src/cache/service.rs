//! Two-tier cache orchestration.

use super::local::LocalCacheStore;
use super::shared::SharedCacheClient;
use crate::config::CacheConfig;
use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::instrument;

/// Timeout for the single startup connection attempt to the shared tier.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of a cache write.
///
/// A write is never an `Err`: shared-tier failures are absorbed and logged.
/// Callers that care about durability can still distinguish a degraded write
/// from a full one through this tri-state result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Every enabled tier accepted the write.
    Full,
    /// The local tier accepted the write, but the shared tier was
    /// configured and either unavailable or failing.
    LocalOnly,
    /// No tier stored the value.
    Failed,
}

impl WriteOutcome {
    /// Returns `true` if at least one tier stored the value.
    #[must_use]
    pub const fn is_stored(self) -> bool {
        !matches!(self, Self::Failed)
    }

    /// Returns `true` if the shared tier missed a write it was configured
    /// to receive.
    #[must_use]
    pub const fn is_degraded(self) -> bool {
        matches!(self, Self::LocalOnly)
    }
}

/// Point-in-time cache statistics.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CacheStats {
    /// Entry count in the local tier (may include unread expired entries).
    pub item_count: usize,
    /// `true` iff the shared tier was enabled in configuration but is
    /// unhealthy, so all traffic is served locally.
    pub fallback_mode: bool,
}

/// Orchestrates reads, writes, and invalidation across the two cache tiers.
///
/// Built once at process start and passed by reference to all consumers;
/// there is deliberately no global instance. The shared tier is attempted
/// exactly once during construction: if it cannot be reached, the service
/// runs in permanent local-only fallback and the only observable trace is
/// [`CacheStats::fallback_mode`].
///
/// # Read/Write Paths
///
/// - Reads consult the shared tier first (when enabled and healthy) so that
///   entries written by other process instances are visible, then fall
///   through to the local tier.
/// - Writes go to the local tier unconditionally and to the shared tier
///   best-effort; a shared write failure is logged, never propagated.
///
/// # Example
///
/// ```rust
/// use fairway::cache::CacheService;
/// use fairway::config::CacheConfig;
///
/// let cache = CacheService::new(CacheConfig::default().with_enable_shared(false));
/// cache.set("rankings:top100", b"[1,2,3]", None);
/// assert!(cache.get("rankings:top100").is_some());
/// assert!(!cache.stats().fallback_mode);
/// ```
pub struct CacheService {
    /// Immutable configuration captured at construction.
    config: CacheConfig,
    /// Local tier, present when `enable_local` is set.
    local: Option<LocalCacheStore>,
    /// Shared tier, present when enabled and the startup connect succeeded.
    shared: Option<SharedCacheClient>,
    /// Shared tier was configured but is permanently unavailable.
    fallback: bool,
}

impl CacheService {
    /// Builds the service, attempting the shared-tier connection once.
    ///
    /// Never fails: a dead shared tier produces a working service in
    /// fallback mode.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        let local = config.enable_local.then(LocalCacheStore::new);

        let (shared, fallback) = if config.enable_shared {
            match SharedCacheClient::connect(&config.shared_endpoint, CONNECT_TIMEOUT) {
                Ok(client) => {
                    tracing::info!(endpoint = %config.shared_endpoint, "shared cache tier enabled");
                    (Some(client), false)
                },
                Err(e) => {
                    tracing::warn!(
                        endpoint = %config.shared_endpoint,
                        error = %e,
                        "shared cache unavailable, falling back to local-only for process lifetime"
                    );
                    (None, true)
                },
            }
        } else {
            (None, false)
        };

        if local.is_some() {
            tracing::debug!("local cache tier enabled");
        }

        Self {
            config,
            local,
            shared,
            fallback,
        }
    }

    /// Retrieves the bytes stored under `key`, or `None` on a miss.
    ///
    /// The shared tier is consulted first when enabled and healthy; a
    /// shared-tier error is treated as a miss there and the local tier is
    /// consulted next.
    #[instrument(skip(self), fields(operation = "cache_get"))]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        if let Some(shared) = &self.shared {
            match shared.get(key) {
                Ok(Some(value)) => {
                    metrics::counter!("cache_hits_total", "tier" => "shared").increment(1);
                    return Some(value);
                },
                Ok(None) => {},
                Err(e) => {
                    tracing::warn!(key, error = %e, "shared cache get failed");
                },
            }
        }

        if let Some(local) = &self.local {
            if let Some(value) = local.get(key) {
                metrics::counter!("cache_hits_total", "tier" => "local").increment(1);
                return Some(value);
            }
        }

        metrics::counter!("cache_misses_total").increment(1);
        None
    }

    /// Stores `value` under `key`.
    ///
    /// Writes to the local tier unconditionally and to the shared tier
    /// best-effort. `ttl: None` uses the configured default TTL.
    #[instrument(skip(self, value), fields(operation = "cache_set", bytes = value.len()))]
    pub fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> WriteOutcome {
        let ttl = ttl.unwrap_or(self.config.default_ttl);

        let wrote_local = if let Some(local) = &self.local {
            local.set(key, value, ttl);
            true
        } else {
            false
        };

        let wrote_shared = match &self.shared {
            Some(shared) => match shared.set(key, value, ttl) {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!(key, error = %e, "shared cache set failed");
                    false
                },
            },
            None => false,
        };

        if !wrote_local && !wrote_shared {
            metrics::counter!("cache_writes_total", "outcome" => "failed").increment(1);
            return WriteOutcome::Failed;
        }
        if self.config.enable_shared && !wrote_shared {
            metrics::counter!("cache_writes_total", "outcome" => "local_only").increment(1);
            return WriteOutcome::LocalOnly;
        }
        metrics::counter!("cache_writes_total", "outcome" => "full").increment(1);
        WriteOutcome::Full
    }

    /// Removes the entry stored under `key` from both tiers.
    ///
    /// A shared-tier failure is logged and does not block local removal.
    pub fn delete(&self, key: &str) {
        if let Some(shared) = &self.shared {
            if let Err(e) = shared.delete(key) {
                tracing::warn!(key, error = %e, "shared cache delete failed");
            }
        }
        if let Some(local) = &self.local {
            local.delete(key);
        }
    }

    /// Removes every key matching `pattern` from both tiers.
    ///
    /// The pattern supports a single trailing `*` on a prefix, e.g.
    /// `course:*`.
    pub fn delete_pattern(&self, pattern: &str) {
        if let Some(shared) = &self.shared {
            if let Err(e) = shared.delete_pattern(pattern) {
                tracing::warn!(pattern, error = %e, "shared cache delete-pattern failed");
            }
        }
        if let Some(local) = &self.local {
            local.delete_pattern(pattern);
        }
    }

    /// Removes all entries from both tiers.
    pub fn clear(&self) {
        if let Some(shared) = &self.shared {
            if let Err(e) = shared.clear() {
                tracing::warn!(error = %e, "shared cache clear failed");
            }
        }
        if let Some(local) = &self.local {
            local.clear();
        }
    }

    /// Retrieves and deserializes a JSON value stored under `key`.
    ///
    /// `Ok(None)` is a miss; `Err` means data was present but could not be
    /// decoded. The two cases are deliberately distinct so callers can tell
    /// "no data" from "corrupt data".
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the stored bytes are not valid
    /// JSON for `T`.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key) {
            None => Ok(None),
            Some(bytes) => serde_json::from_slice(&bytes).map(Some).map_err(|e| {
                Error::Serialization {
                    operation: "get_json".to_string(),
                    cause: e.to_string(),
                }
            }),
        }
    }

    /// Serializes `value` to JSON and stores it under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the value cannot be encoded; the
    /// write itself follows [`set`](Self::set) semantics.
    pub fn set_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<WriteOutcome> {
        let bytes = serde_json::to_vec(value).map_err(|e| Error::Serialization {
            operation: "set_json".to_string(),
            cause: e.to_string(),
        })?;
        Ok(self.set(key, &bytes, ttl))
    }

    /// Returns current statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            item_count: self.local.as_ref().map_or(0, LocalCacheStore::item_count),
            fallback_mode: self.fallback,
        }
    }

    /// Probes shared-tier liveness.
    ///
    /// Delegates to the shared tier only when it is enabled; with the
    /// shared tier disabled this always succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the shared tier is enabled but unreachable,
    /// including the permanent-fallback state entered at startup.
    pub fn health_check(&self) -> Result<()> {
        if !self.config.enable_shared {
            return Ok(());
        }
        match &self.shared {
            Some(shared) => shared.health_check(),
            None => Err(Error::OperationFailed {
                operation: "shared_health_check".to_string(),
                cause: "shared tier unavailable since startup".to_string(),
            }),
        }
    }
}
