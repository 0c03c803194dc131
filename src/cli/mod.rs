//! CLI command implementations.
//!
//! This module provides the command-line interface for fairway. Each
//! submodule implements a specific CLI command.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `import` | Deduplicate a scraped course feed and report counts |
//! | `hash` | Print the identity token for a name/address pair |
//! | `normalize` | Print the normalized form of a free-text identifier |
//! | `status` | Build the cache from configuration and report stats/health |
//!
//! # Example Usage
//!
//! ```bash
//! # Validate a scraper feed without touching the database
//! fairway import scraped_courses.json
//!
//! # Inspect identity hashing
//! fairway hash "Pine Valley G.C." "Pine Valley, NJ 08021"
//! fairway normalize "Pebble Beach Golf Links"
//!
//! # Probe the configured cache tiers
//! fairway status
//! ```

mod import;
mod inspect;
mod status;

pub use import::cmd_import;
pub use inspect::{cmd_hash, cmd_normalize};
pub use status::cmd_status;
