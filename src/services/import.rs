//! Bulk import deduplication.

use crate::Result;
use crate::identity::IdentityHasher;
use crate::models::{ImportCandidate, ImportOutcome};
use crate::storage::CatalogStore;
use std::sync::Arc;
use tracing::instrument;

/// Decides "new" vs "duplicate" for bulk ingestion candidates.
///
/// The gateway loads the complete known-token set once per batch (a single
/// bulk lookup, never one query per candidate) and then walks the batch in
/// input order. A token inserted earlier in the batch is immediately
/// visible to later duplicate checks, so a batch never re-inserts itself.
///
/// Per-item failures never abort the batch: blank fields and persistence
/// errors are counted and processing continues. The known-token set built
/// here is private per-batch state; duplicate detection across batches
/// running concurrently against the same store is not guaranteed.
///
/// # Example
///
/// ```rust
/// use fairway::services::DeduplicationGateway;
/// use fairway::storage::MemoryCatalogStore;
/// use fairway::models::ImportCandidate;
/// use std::sync::Arc;
///
/// let store = Arc::new(MemoryCatalogStore::new());
/// let gateway = DeduplicationGateway::new(store);
///
/// let outcome = gateway
///     .process_import_batch(&[
///         ImportCandidate::new("Pine Valley Golf Club", "Pine Valley, NJ 08021"),
///         ImportCandidate::new("Pine Valley G.C.", "Pine Valley, NJ 08021"),
///     ])
///     .unwrap();
/// assert_eq!(outcome.new_count, 1);
/// assert_eq!(outcome.skipped_count, 1);
/// ```
pub struct DeduplicationGateway<S: CatalogStore> {
    /// Persistence collaborator.
    store: Arc<S>,
    /// Owner recorded on created entries.
    owner_id: Option<u64>,
}

impl<S: CatalogStore> DeduplicationGateway<S> {
    /// Creates a gateway over the given store.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            owner_id: None,
        }
    }

    /// Sets the owner recorded on entries created by this gateway.
    #[must_use]
    pub const fn with_owner_id(mut self, owner_id: u64) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Processes a batch of ingestion candidates in input order.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bulk token lookup fails; per-candidate
    /// validation and persistence failures are tallied in the outcome
    /// instead.
    #[instrument(skip(self, candidates), fields(operation = "import_batch", total = candidates.len()))]
    pub fn process_import_batch(&self, candidates: &[ImportCandidate]) -> Result<ImportOutcome> {
        let mut known = self.store.load_known_tokens()?;
        tracing::debug!(known = known.len(), "loaded known identity tokens");

        let total = candidates.len();
        let mut outcome = ImportOutcome {
            total_count: total,
            ..ImportOutcome::default()
        };

        for (i, candidate) in candidates.iter().enumerate() {
            let position = i + 1;
            let name = candidate.name.trim();
            let address = candidate.address.trim();

            if name.is_empty() || address.is_empty() {
                tracing::warn!(
                    position,
                    total,
                    "rejected candidate with blank name or address"
                );
                outcome.error_count += 1;
                continue;
            }

            let token = IdentityHasher::hash(name, address);

            if known.contains(&token) {
                tracing::debug!(position, total, %token, name, "skipping duplicate");
                outcome.skipped_count += 1;
                continue;
            }

            let payload = serde_json::json!({
                "name": name,
                "address": address,
                "source": "bulk_import",
            })
            .to_string();

            match self
                .store
                .create_course(name, address, &payload, self.owner_id)
            {
                Ok(record) => {
                    tracing::debug!(position, total, %token, id = record.id, name, "created course");
                    known.insert(token);
                    outcome.new_count += 1;
                },
                Err(e) => {
                    tracing::warn!(position, total, %token, error = %e, "failed to persist candidate");
                    outcome.error_count += 1;
                },
            }
        }

        metrics::counter!("import_candidates_total", "result" => "new")
            .increment(outcome.new_count as u64);
        metrics::counter!("import_candidates_total", "result" => "skipped")
            .increment(outcome.skipped_count as u64);
        metrics::counter!("import_candidates_total", "result" => "error")
            .increment(outcome.error_count as u64);

        tracing::info!(
            new = outcome.new_count,
            skipped = outcome.skipped_count,
            errors = outcome.error_count,
            total = outcome.total_count,
            "import batch complete"
        );

        Ok(outcome)
    }
}
