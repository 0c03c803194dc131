//! Configuration management.

use serde::Deserialize;
use std::time::Duration;

/// Cache subsystem configuration.
///
/// Immutable after construction: [`crate::cache::CacheService`] captures it
/// at build time and never re-reads it.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Connection target for the shared tier (e.g. `redis://localhost:6379`).
    pub shared_endpoint: String,
    /// Whether to attempt the shared tier at startup.
    pub enable_shared: bool,
    /// Whether to keep an in-process local tier.
    pub enable_local: bool,
    /// TTL applied to writes that do not specify one.
    pub default_ttl: Duration,
    /// Advisory memory budget for the local tier, in megabytes.
    ///
    /// Accepted but not enforced: the local tier has no eviction beyond
    /// lazy TTL reclamation, so this value is informational only.
    pub local_memory_budget_mb: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            shared_endpoint: "redis://localhost:6379".to_string(),
            enable_shared: true,
            enable_local: true,
            default_ttl: Duration::from_secs(30 * 60),
            local_memory_budget_mb: 100,
        }
    }
}

impl CacheConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shared tier endpoint.
    #[must_use]
    pub fn with_shared_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.shared_endpoint = endpoint.into();
        self
    }

    /// Enables or disables the shared tier.
    #[must_use]
    pub const fn with_enable_shared(mut self, enabled: bool) -> Self {
        self.enable_shared = enabled;
        self
    }

    /// Enables or disables the local tier.
    #[must_use]
    pub const fn with_enable_local(mut self, enabled: bool) -> Self {
        self.enable_local = enabled;
        self
    }

    /// Sets the default TTL.
    #[must_use]
    pub const fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &std::path::Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: e.to_string(),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/fairway/` on macOS)
    /// 2. XDG config dir (`~/.config/fairway/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let platform_config = base_dirs.config_dir().join("fairway").join("config.toml");
        if platform_config.exists() {
            if let Ok(config) = Self::load_from_file(&platform_config) {
                return config;
            }
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("fairway")
            .join("config.toml");
        if xdg_config.exists() {
            if let Ok(config) = Self::load_from_file(&xdg_config) {
                return config;
            }
        }

        Self::default()
    }

    /// Applies environment variable overrides.
    ///
    /// Recognized variables (same names the deployment has always used):
    /// `REDIS_URL`, `CACHE_ENABLE_REDIS`, `CACHE_ENABLE_MEMORY`,
    /// `CACHE_DEFAULT_TTL_SECS`, `CACHE_MAX_MEMORY_MB`. Unparseable values
    /// are ignored, as is an empty `REDIS_URL`.
    #[must_use]
    pub fn apply_env(self) -> Self {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    ///
    /// Split out from [`apply_env`](Self::apply_env) so the layering can be
    /// exercised without mutating process-global environment state.
    fn apply_env_from(mut self, get: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = get("REDIS_URL") {
            if !url.is_empty() {
                self.shared_endpoint = url;
            }
        }
        if let Some(v) = get("CACHE_ENABLE_REDIS").as_deref().and_then(parse_bool) {
            self.enable_shared = v;
        }
        if let Some(v) = get("CACHE_ENABLE_MEMORY").as_deref().and_then(parse_bool) {
            self.enable_local = v;
        }
        if let Some(secs) = get("CACHE_DEFAULT_TTL_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                self.default_ttl = Duration::from_secs(secs);
            }
        }
        if let Some(mb) = get("CACHE_MAX_MEMORY_MB") {
            if let Ok(mb) = mb.parse::<usize>() {
                self.local_memory_budget_mb = mb;
            }
        }
        self
    }

    /// Converts a parsed `ConfigFile` to a `CacheConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();
        let Some(cache) = file.cache else {
            return config;
        };

        if let Some(endpoint) = cache.shared_endpoint {
            config.shared_endpoint = endpoint;
        }
        if let Some(v) = cache.enable_shared {
            config.enable_shared = v;
        }
        if let Some(v) = cache.enable_local {
            config.enable_local = v;
        }
        if let Some(secs) = cache.default_ttl_secs {
            config.default_ttl = Duration::from_secs(secs);
        }
        if let Some(mb) = cache.local_memory_budget_mb {
            config.local_memory_budget_mb = mb;
        }
        config
    }
}

/// Parses a boolean environment variable value.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    /// Cache section.
    cache: Option<ConfigFileCache>,
}

/// Cache section in the config file.
#[derive(Debug, Deserialize, Default)]
struct ConfigFileCache {
    /// Shared tier endpoint.
    shared_endpoint: Option<String>,
    /// Enable the shared tier.
    enable_shared: Option<bool>,
    /// Enable the local tier.
    enable_local: Option<bool>,
    /// Default TTL in seconds.
    default_ttl_secs: Option<u64>,
    /// Advisory local memory budget in megabytes.
    local_memory_budget_mb: Option<usize>,
}
