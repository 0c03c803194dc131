//! # Fairway
//!
//! Caching and content-identity subsystem for a golf course catalog service.
//!
//! Fairway provides the two pieces of the catalog backend with real
//! invariants: a two-tier cache (in-process local store plus an optional
//! Redis-backed shared tier with graceful degradation) and a deterministic
//! identity-hashing scheme used to deduplicate catalog entries during bulk
//! ingestion despite inconsistent textual formatting.
//!
//! ## Features
//!
//! - Two-tier cache with TTL expiry, prefix invalidation, and best-effort
//!   shared-tier semantics (shared failures never fail the operation)
//! - Permanent local-only fallback when the shared tier is unreachable at
//!   startup, observable via [`cache::CacheStats`]
//! - Deterministic 16-hex-character identity tokens derived from normalized
//!   name and address strings
//! - Batch import deduplication with a single bulk token lookup per batch
//!
//! ## Example
//!
//! ```rust
//! use fairway::cache::CacheService;
//! use fairway::config::CacheConfig;
//! use std::time::Duration;
//!
//! let config = CacheConfig::default()
//!     .with_enable_shared(false)
//!     .with_default_ttl(Duration::from_secs(60));
//! let cache = CacheService::new(config);
//!
//! cache.set("course:1", b"payload", None);
//! assert_eq!(cache.get("course:1").as_deref(), Some(&b"payload"[..]));
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod cache;
pub mod cli;
pub mod config;
pub mod identity;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

// Re-exports for convenience
pub use cache::{CacheService, CacheStats, WriteOutcome};
pub use config::CacheConfig;
pub use identity::IdentityHasher;
pub use models::{CourseRecord, IdentityToken, ImportCandidate, ImportOutcome};
pub use services::DeduplicationGateway;
pub use storage::{CatalogStore, MemoryCatalogStore};

/// Error type for fairway operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// Cache misses are deliberately **not** an error: byte-level reads return
/// `Option` and JSON reads return `Ok(None)`, so callers can always tell
/// "no data" from "corrupt data" or "operation failed".
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Blank name or address handed to the identity commands |
/// | `OperationFailed` | Shared-tier commands fail, persistence fails, config file unreadable |
/// | `Serialization` | Cached bytes cannot be decoded, or a value cannot be encoded |
/// | `FeatureNotEnabled` | Shared tier requested on a build without the `redis` feature |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when an empty or whitespace-only name/address is handed to an
    /// operation that requires one. Import batches do not raise this: blank
    /// candidates there are tallied as errors and the batch continues.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - Redis commands fail or the connection cannot be established
    /// - A catalog store create or bulk lookup fails
    /// - The configuration file cannot be read or parsed
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A cached value could not be serialized or deserialized.
    ///
    /// Distinct from a cache miss: a miss means no data was stored under the
    /// key, while this variant means data was present but unusable.
    #[error("serialization failed during '{operation}': {cause}")]
    Serialization {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// Feature not enabled (requires a cargo feature flag).
    ///
    /// Raised when the shared cache tier is configured on a build compiled
    /// without the `redis` feature. Callers treat this identically to an
    /// unreachable shared tier.
    #[error("feature not enabled: {0} (compile with --features {0})")]
    FeatureNotEnabled(String),
}

/// Result type alias for fairway operations.
pub type Result<T> = std::result::Result<T, Error>;
