//! Logging initialization.
//!
//! Cache and import internals emit `tracing` events and `metrics` counters;
//! this module wires a `tracing-subscriber` pipeline for the binary. Library
//! consumers embedding fairway install their own subscriber and recorder
//! instead, and everything here stays a no-op for them.

use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Text,
    /// Newline-delimited JSON, for log shippers.
    Json,
}

impl LogFormat {
    /// Parses a format string; unknown values fall back to text.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Options for logging initialization.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitOptions {
    /// Whether verbose output was requested via CLI.
    pub verbose: bool,
    /// Log output format.
    pub format: LogFormat,
}

static LOGGING_INIT: OnceLock<()> = OnceLock::new();

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flag. Safe to call more
/// than once; only the first call installs a subscriber.
pub fn init(options: InitOptions) {
    LOGGING_INIT.get_or_init(|| {
        let default_directive = if options.verbose { "debug" } else { "info" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false);

        let result = match options.format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Text => builder.try_init(),
        };
        // A subscriber installed by an embedding application wins.
        drop(result);
    });
}
