//! Cache service integration tests.
//!
//! Exercises the public cache surface without a shared tier: TTL expiry,
//! invalidation, the typed JSON boundary, degraded-mode behavior, and
//! concurrent access. Shared-tier behavior against a live server lives in
//! `redis_integration.rs`.

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use fairway::cache::{CacheService, WriteOutcome};
use fairway::config::CacheConfig;
use fairway::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn local_only() -> CacheService {
    CacheService::new(
        CacheConfig::default()
            .with_enable_shared(false)
            .with_default_ttl(Duration::from_secs(300)),
    )
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct CoursePage {
    course_id: u64,
    name: String,
    review_ids: Vec<u64>,
}

#[test]
fn test_full_read_write_cycle() {
    let cache = local_only();

    assert!(cache.get("course:42:page").is_none());

    let outcome = cache.set("course:42:page", b"<html>", None);
    assert_eq!(outcome, WriteOutcome::Full);
    assert_eq!(cache.get("course:42:page").as_deref(), Some(&b"<html>"[..]));

    cache.delete("course:42:page");
    assert!(cache.get("course:42:page").is_none());
}

#[test]
fn test_ttl_expiry_end_to_end() {
    let cache = local_only();
    cache.set("short", b"lived", Some(Duration::from_millis(20)));
    cache.set("long", b"lived", Some(Duration::from_secs(300)));

    thread::sleep(Duration::from_millis(50));

    assert!(cache.get("short").is_none());
    assert!(cache.get("long").is_some());
}

#[test]
fn test_prefix_invalidation_leaves_other_keys() {
    let cache = local_only();
    cache.set("course:1", b"a", None);
    cache.set("course:1:reviews", b"b", None);
    cache.set("course:2", b"c", None);
    cache.set("rankings:2026", b"d", None);

    // Invalidate everything for course 1 after an edit.
    cache.delete_pattern("course:1*");

    assert!(cache.get("course:1").is_none());
    assert!(cache.get("course:1:reviews").is_none());
    assert!(cache.get("course:2").is_some());
    assert!(cache.get("rankings:2026").is_some());
}

#[test]
fn test_clear_resets_stats() {
    let cache = local_only();
    cache.set("a", b"1", None);
    cache.set("b", b"2", None);
    assert_eq!(cache.stats().item_count, 2);

    cache.clear();
    assert_eq!(cache.stats().item_count, 0);
}

#[test]
fn test_typed_json_boundary() {
    let cache = local_only();
    let page = CoursePage {
        course_id: 42,
        name: "Pebble Beach Golf Links".to_string(),
        review_ids: vec![7, 9, 12],
    };

    cache.set_json("course:42:page", &page, None).unwrap();
    let back: Option<CoursePage> = cache.get_json("course:42:page").unwrap();
    assert_eq!(back, Some(page));

    // A miss is Ok(None), never an error.
    let miss: Result<Option<CoursePage>> = cache.get_json("course:404");
    assert!(matches!(miss, Ok(None)));

    // Bytes that are not valid JSON for the target type are an error, so
    // callers can tell corrupt data from absent data.
    cache.set("course:43:page", b"\x00\x01 not json", None);
    let corrupt: Result<Option<CoursePage>> = cache.get_json("course:43:page");
    assert!(matches!(corrupt, Err(Error::Serialization { .. })));
}

#[test]
fn test_unreachable_shared_tier_degrades_not_fails() {
    // Nothing listens on port 1; without the `redis` feature the stub fails
    // the same way. Both paths must produce a working local-only service.
    let cache = CacheService::new(
        CacheConfig::default()
            .with_shared_endpoint("redis://127.0.0.1:1")
            .with_default_ttl(Duration::from_secs(300)),
    );

    assert!(cache.stats().fallback_mode);
    assert!(cache.health_check().is_err());

    let outcome = cache.set("course:1", b"payload", None);
    assert_eq!(outcome, WriteOutcome::LocalOnly);
    assert!(outcome.is_stored());
    assert!(outcome.is_degraded());
    assert_eq!(cache.get("course:1").as_deref(), Some(&b"payload"[..]));

    cache.delete_pattern("course:*");
    assert!(cache.get("course:1").is_none());
}

#[test]
fn test_concurrent_readers_and_writers() {
    let cache = Arc::new(local_only());
    let mut handles = Vec::new();

    for worker in 0..4u32 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..50u32 {
                let key = format!("worker:{worker}:{i}");
                cache.set(&key, key.as_bytes(), None);
                assert_eq!(cache.get(&key).as_deref(), Some(key.as_bytes()));
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.stats().item_count, 200);
}
