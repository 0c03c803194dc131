//! End-to-end import deduplication tests.
//!
//! Exercises the full pipeline a scraper run goes through: candidate feed in,
//! normalization, identity hashing, duplicate detection against both the
//! store and earlier entries in the same batch, and tally reporting.

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use fairway::IdentityHasher;
use fairway::models::ImportCandidate;
use fairway::services::DeduplicationGateway;
use fairway::storage::{CatalogStore, MemoryCatalogStore};
use std::sync::Arc;

fn candidate(name: &str, address: &str) -> ImportCandidate {
    ImportCandidate::new(name, address)
}

/// A realistic scraper feed: four distinct courses plus two duplicates, one
/// exact and one that only normalization can catch.
fn sample_feed() -> Vec<ImportCandidate> {
    vec![
        candidate(
            "Pebble Beach Golf Links",
            "1700 17-Mile Drive, Pebble Beach, CA 93953",
        ),
        candidate(
            "Augusta National Golf Club",
            "2604 Washington Road, Augusta, GA 30904",
        ),
        candidate(
            "TPC Sawgrass",
            "110 Championship Way, Ponte Vedra Beach, FL 32082",
        ),
        candidate("Pine Valley Golf Club", "Pine Valley, NJ 08021"),
        // Same course as above, formatted the way a different site lists it.
        candidate("Pine Valley G.C.", "Pine Valley, NJ 08021"),
        // Exact duplicate of the first entry.
        candidate(
            "Pebble Beach Golf Links",
            "1700 17-Mile Drive, Pebble Beach, CA 93953",
        ),
    ]
}

#[test]
fn test_sample_feed_tallies() {
    let store = Arc::new(MemoryCatalogStore::new());
    let gateway = DeduplicationGateway::new(store.clone());

    let outcome = gateway.process_import_batch(&sample_feed()).unwrap();

    assert_eq!(outcome.new_count, 4);
    assert_eq!(outcome.skipped_count, 2);
    assert_eq!(outcome.error_count, 0);
    assert_eq!(outcome.total_count, 6);
    assert_eq!(store.records().unwrap().len(), 4);
}

#[test]
fn test_rerunning_feed_creates_nothing() {
    let store = Arc::new(MemoryCatalogStore::new());
    let gateway = DeduplicationGateway::new(store.clone());

    gateway.process_import_batch(&sample_feed()).unwrap();
    let second = gateway.process_import_batch(&sample_feed()).unwrap();

    assert_eq!(second.new_count, 0);
    assert_eq!(second.skipped_count, 6);
    assert_eq!(store.records().unwrap().len(), 4);
}

#[test]
fn test_created_records_carry_identity_and_payload() {
    let store = Arc::new(MemoryCatalogStore::new());
    let gateway = DeduplicationGateway::new(store.clone()).with_owner_id(9);

    gateway
        .process_import_batch(&[candidate("Pine Valley Golf Club", "Pine Valley, NJ 08021")])
        .unwrap();

    let records = store.records().unwrap();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(
        record.token,
        IdentityHasher::hash("Pine Valley Golf Club", "Pine Valley, NJ 08021")
    );
    assert_eq!(record.owner_id, Some(9));

    let payload: serde_json::Value = serde_json::from_str(&record.payload).unwrap();
    assert_eq!(payload["name"], "Pine Valley Golf Club");
    assert_eq!(payload["source"], "bulk_import");
}

#[test]
fn test_blank_candidates_do_not_block_valid_ones() {
    let store = Arc::new(MemoryCatalogStore::new());
    let gateway = DeduplicationGateway::new(store.clone());

    let outcome = gateway
        .process_import_batch(&[
            candidate("", ""),
            candidate("TPC Sawgrass", "110 Championship Way"),
            candidate("   ", "110 Championship Way"),
        ])
        .unwrap();

    assert_eq!(outcome.error_count, 2);
    assert_eq!(outcome.new_count, 1);
    assert_eq!(store.records().unwrap().len(), 1);
}

#[test]
fn test_batch_sees_tokens_created_by_direct_store_writes() {
    let store = Arc::new(MemoryCatalogStore::new());
    store
        .create_course(
            "Pebble Beach Golf Links",
            "1700 17-Mile Drive, Pebble Beach, CA 93953",
            "{}",
            None,
        )
        .unwrap();

    let gateway = DeduplicationGateway::new(store);
    let outcome = gateway
        .process_import_batch(&[candidate(
            "PEBBLE BEACH GOLF LINKS",
            "1700 17-Mile Drive,  Pebble Beach, CA 93953",
        )])
        .unwrap();

    assert_eq!(outcome.new_count, 0);
    assert_eq!(outcome.skipped_count, 1);
}

#[test]
fn test_empty_feed_is_a_noop() {
    let gateway = DeduplicationGateway::new(Arc::new(MemoryCatalogStore::new()));
    let outcome = gateway.process_import_batch(&[]).unwrap();

    assert_eq!(outcome.total_count, 0);
    assert_eq!(outcome.new_count, 0);
}
