//! Status command implementation.

use crate::cache::CacheService;
use crate::config::CacheConfig;
use crate::{Error, Result};
use std::io::{self, Write};

/// Builds a cache service from the given configuration and reports tier
/// state, statistics, and shared-tier health.
///
/// This is the operational probe: it performs the same single startup
/// connection attempt the application would, so fallback mode here means
/// the application would run local-only too.
///
/// # Errors
///
/// Returns an error if output cannot be written. An unhealthy shared tier
/// is reported, not returned as an error.
pub fn cmd_status(config: CacheConfig, as_json: bool) -> Result<()> {
    let shared_configured = config.enable_shared;
    let endpoint = config.shared_endpoint.clone();
    let cache = CacheService::new(config);
    let stats = cache.stats();
    let health = cache.health_check();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if as_json {
        let encoded = serde_json::to_string_pretty(&serde_json::json!({
            "shared_endpoint": endpoint,
            "shared_configured": shared_configured,
            "fallback_mode": stats.fallback_mode,
            "local_items": stats.item_count,
            "healthy": health.is_ok(),
        }))
        .map_err(|e| Error::Serialization {
            operation: "encode_status_output".to_string(),
            cause: e.to_string(),
        })?;
        writeln!(handle, "{encoded}").map_err(write_failed)?;
        return Ok(());
    }

    writeln!(handle, "Cache status").map_err(write_failed)?;
    writeln!(handle, "  shared endpoint: {endpoint}").map_err(write_failed)?;
    writeln!(
        handle,
        "  shared tier:     {}",
        if !shared_configured {
            "disabled"
        } else if stats.fallback_mode {
            "unavailable (local-only fallback)"
        } else {
            "connected"
        }
    )
    .map_err(write_failed)?;
    writeln!(handle, "  local items:     {}", stats.item_count).map_err(write_failed)?;
    match health {
        Ok(()) => writeln!(handle, "  health:          ok").map_err(write_failed)?,
        Err(e) => writeln!(handle, "  health:          failing ({e})").map_err(write_failed)?,
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
    fn test_status_with_shared_disabled() {
        let config = CacheConfig::default().with_enable_shared(false);
        assert!(cmd_status(config.clone(), false).is_ok());
        assert!(cmd_status(config, true).is_ok());
    }

    #[test]
    fn test_status_reports_unreachable_shared_tier() {
        let config = CacheConfig::default().with_shared_endpoint("redis://127.0.0.1:1");
        assert!(cmd_status(config, false).is_ok());
    }
}
