//! Import command implementation.

use crate::models::ImportCandidate;
use crate::services::DeduplicationGateway;
use crate::storage::MemoryCatalogStore;
use crate::{Error, Result};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

/// Runs a scraped feed through the deduplication gateway and prints the
/// processing summary.
///
/// The feed is a JSON array of `{"name": ..., "address": ...}` objects
/// (the legacy `course_name` field is also accepted). Records land in an
/// in-memory store, so this is a validation run: it answers "how many of
/// these are actually new" without writing anywhere durable.
///
/// # Errors
///
/// Returns an error if the feed cannot be read or parsed, or if the batch
/// itself aborts. Per-candidate failures are tallied, not propagated.
pub fn cmd_import(feed_path: &Path, owner_id: Option<u64>, as_json: bool) -> Result<()> {
    let contents = std::fs::read_to_string(feed_path).map_err(|e| Error::OperationFailed {
        operation: "read_import_feed".to_string(),
        cause: format!("{}: {e}", feed_path.display()),
    })?;

    let candidates: Vec<ImportCandidate> =
        serde_json::from_str(&contents).map_err(|e| Error::Serialization {
            operation: "parse_import_feed".to_string(),
            cause: e.to_string(),
        })?;

    let store = Arc::new(MemoryCatalogStore::new());
    let mut gateway = DeduplicationGateway::new(store);
    if let Some(owner_id) = owner_id {
        gateway = gateway.with_owner_id(owner_id);
    }

    let outcome = gateway.process_import_batch(&candidates)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if as_json {
        let encoded =
            serde_json::to_string_pretty(&outcome).map_err(|e| Error::Serialization {
                operation: "encode_import_outcome".to_string(),
                cause: e.to_string(),
            })?;
        writeln!(handle, "{encoded}").map_err(write_failed)?;
    } else {
        writeln!(handle, "{outcome}").map_err(write_failed)?;
    }

    Ok(())
}

fn write_failed(e: io::Error) -> Error {
    Error::OperationFailed {
        operation: "write_stdout".to_string(),
        cause: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_valid_feed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"name": "Pebble Beach Golf Links", "address": "1700 17-Mile Drive"}},
                {{"course_name": "Pine Valley G.C.", "address": "Pine Valley, NJ 08021"}}
            ]"#
        )
        .unwrap();

        assert!(cmd_import(file.path(), None, false).is_ok());
        assert!(cmd_import(file.path(), Some(7), true).is_ok());
    }

    #[test]
    fn test_import_missing_file() {
        let result = cmd_import(Path::new("/nonexistent/feed.json"), None, false);
        assert!(matches!(result, Err(Error::OperationFailed { .. })));
    }

    #[test]
    fn test_import_malformed_feed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not a json array").unwrap();

        let result = cmd_import(file.path(), None, false);
        assert!(matches!(result, Err(Error::Serialization { .. })));
    }
}
