//! Data models for fairway.
//!
//! This module contains the core data structures shared across the cache and
//! import subsystems.

mod course;
mod import;
mod token;

pub use course::CourseRecord;
pub use import::{ImportCandidate, ImportOutcome};
pub use token::IdentityToken;
