//! Bulk import models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single ingestion candidate: a raw name/address pair.
///
/// Deserializes from the scraper feed format, which labels the name field
/// `course_name`; plain `name` is accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportCandidate {
    /// Raw course name.
    #[serde(alias = "course_name")]
    pub name: String,
    /// Raw course address.
    pub address: String,
}

impl ImportCandidate {
    /// Creates a candidate from raw strings.
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Per-batch import tally.
///
/// Created fresh for each batch and discarded after reporting. The counters
/// always satisfy `new + skipped + errors == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    /// Candidates persisted as new records.
    pub new_count: usize,
    /// Candidates skipped as duplicates (known token).
    pub skipped_count: usize,
    /// Candidates rejected by validation or failed persistence.
    pub error_count: usize,
    /// Total candidates processed.
    pub total_count: usize,
}

impl fmt::Display for ImportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processing summary:")?;
        writeln!(f, "  new:     {}", self.new_count)?;
        writeln!(f, "  skipped: {}", self.skipped_count)?;
        writeln!(f, "  errors:  {}", self.error_count)?;
        write!(f, "  total:   {}", self.total_count)
    }
}
