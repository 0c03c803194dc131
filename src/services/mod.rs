//! Service layer.
//!
//! Services orchestrate the lower-level identity and storage primitives
//! into the operations the application actually runs.

mod import;

pub use import::DeduplicationGateway;
