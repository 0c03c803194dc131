//! Catalog persistence.
//!
//! The real deployment persists courses in a relational database behind the
//! HTTP application; this crate only defines the narrow interface the import
//! path needs ([`CatalogStore`]) plus a thread-safe in-memory implementation
//! used by the CLI's validation runs and by tests.

mod memory;
mod traits;

pub use memory::MemoryCatalogStore;
pub use traits::CatalogStore;
