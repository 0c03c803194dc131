//! Content identity: normalization and deterministic hashing.
//!
//! Catalog entries arrive from scraped feeds with inconsistent formatting
//! ("Pine Valley Golf Club" vs "Pine Valley G.C."). This module canonicalizes
//! free-text identifiers and derives a short deterministic token from them,
//! so the same real-world course always maps to the same token regardless of
//! how a feed happened to spell it.

mod hasher;
mod normalize;

pub use hasher::{IdentityHasher, TOKEN_LENGTH};
pub use normalize::normalize;
