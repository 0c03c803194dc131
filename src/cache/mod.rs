//! Two-tier caching.
//!
//! The cache has two independent tiers:
//!
//! - **Local tier** ([`LocalCacheStore`]): in-process, per-instance store
//!   with per-entry TTL and lazy eviction.
//! - **Shared tier** ([`SharedCacheClient`]): optional Redis-backed store
//!   reachable by multiple process instances, compiled in behind the
//!   `redis` cargo feature.
//!
//! [`CacheService`] orchestrates the two: reads consult the shared tier
//! first when it is enabled and healthy, writes go to both, and every
//! shared-tier failure degrades silently to local-only behavior. Each tier
//! holds its own independent copy of an entry; nothing is shared across
//! tiers.

mod local;
mod service;
mod shared;

pub use local::LocalCacheStore;
pub use service::{CacheService, CacheStats, WriteOutcome};
pub use shared::SharedCacheClient;
