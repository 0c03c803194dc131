//! Redis-backed shared cache tier.
//!
//! The shared tier is optional twice over: it is compiled in behind the
//! `redis` cargo feature, and at runtime it is attempted exactly once at
//! startup. If [`SharedCacheClient::connect`] fails, the caller operates in
//! permanent local-only fallback for the remainder of the process lifetime.
//! There is no retry and no periodic reconnection; that limitation is
//! deliberate and documented.
//!
//! # Command Timeout
//!
//! Connections carry a 5-second read/write timeout so no shared-tier call
//! can block indefinitely on a slow or unresponsive server.

#[cfg(feature = "redis")]
mod implementation {
    use crate::{Error, Result};
    use redis::{Client, Commands, Connection};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Response timeout for shared-tier commands.
    const RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

    /// Client for the external shared cache.
    ///
    /// # Connection Management
    ///
    /// Maintains a reusable connection via `Mutex<Option<Connection>>`. The
    /// connection is established at [`connect`](Self::connect) time and
    /// reused across operations; if a command breaks it, the next call
    /// creates a fresh one.
    pub struct SharedCacheClient {
        /// Redis client.
        client: Client,
        /// Cached connection for reuse.
        connection: Mutex<Option<Connection>>,
    }

    impl SharedCacheClient {
        /// Connects to the shared cache and verifies liveness with a ping.
        ///
        /// Attempted exactly once at process startup with `connect_timeout`
        /// bounding the connection attempt. On failure the caller must treat
        /// the shared tier as permanently unavailable; this type offers no
        /// reconnection path.
        ///
        /// # Errors
        ///
        /// Returns an error if the endpoint cannot be parsed, the connection
        /// cannot be established within the timeout, or the ping fails.
        pub fn connect(endpoint: &str, connect_timeout: Duration) -> Result<Self> {
            let client = Client::open(endpoint).map_err(|e| Error::OperationFailed {
                operation: "shared_parse_endpoint".to_string(),
                cause: e.to_string(),
            })?;

            let mut conn = client
                .get_connection_with_timeout(connect_timeout)
                .map_err(|e| Error::OperationFailed {
                    operation: "shared_connect".to_string(),
                    cause: e.to_string(),
                })?;

            conn.set_read_timeout(Some(RESPONSE_TIMEOUT))
                .map_err(|e| Error::OperationFailed {
                    operation: "shared_set_read_timeout".to_string(),
                    cause: e.to_string(),
                })?;
            conn.set_write_timeout(Some(RESPONSE_TIMEOUT))
                .map_err(|e| Error::OperationFailed {
                    operation: "shared_set_write_timeout".to_string(),
                    cause: e.to_string(),
                })?;

            let pong: String =
                redis::cmd("PING")
                    .query(&mut conn)
                    .map_err(|e| Error::OperationFailed {
                        operation: "shared_ping".to_string(),
                        cause: e.to_string(),
                    })?;
            tracing::debug!(endpoint, response = %pong, "shared cache connected");

            Ok(Self {
                client,
                connection: Mutex::new(Some(conn)),
            })
        }

        /// Gets a connection, reusing the cached one if available.
        fn get_connection(&self) -> Result<Connection> {
            let mut guard = self.connection.lock().map_err(|e| Error::OperationFailed {
                operation: "shared_lock_connection".to_string(),
                cause: e.to_string(),
            })?;

            if let Some(conn) = guard.take() {
                // If this connection is broken the caller gets the error and
                // the next call creates a fresh one.
                return Ok(conn);
            }

            let conn = self
                .client
                .get_connection()
                .map_err(|e| Error::OperationFailed {
                    operation: "shared_get_connection".to_string(),
                    cause: e.to_string(),
                })?;

            conn.set_read_timeout(Some(RESPONSE_TIMEOUT))
                .map_err(|e| Error::OperationFailed {
                    operation: "shared_set_read_timeout".to_string(),
                    cause: e.to_string(),
                })?;
            conn.set_write_timeout(Some(RESPONSE_TIMEOUT))
                .map_err(|e| Error::OperationFailed {
                    operation: "shared_set_write_timeout".to_string(),
                    cause: e.to_string(),
                })?;

            Ok(conn)
        }

        /// Returns a connection to the cache for reuse.
        fn return_connection(&self, conn: Connection) {
            if let Ok(mut guard) = self.connection.lock() {
                *guard = Some(conn);
            }
            // If the lock fails, just drop the connection - not critical.
        }

        /// Retrieves the bytes stored under `key`.
        ///
        /// # Errors
        ///
        /// Returns an error if the command fails. A missing key is
        /// `Ok(None)`, not an error.
        pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
            let mut conn = self.get_connection()?;

            let result: redis::RedisResult<Option<Vec<u8>>> = conn.get(key);
            let output = result.map_err(|e| Error::OperationFailed {
                operation: "shared_get".to_string(),
                cause: e.to_string(),
            });
            self.return_connection(conn);
            output
        }

        /// Stores `value` under `key`, expiring after `ttl`.
        ///
        /// Sub-second TTLs round up to one second, the smallest expiry the
        /// backend supports.
        ///
        /// # Errors
        ///
        /// Returns an error if the command fails.
        pub fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
            let mut conn = self.get_connection()?;
            let seconds = ttl.as_secs().max(1);

            let result: redis::RedisResult<()> = conn.set_ex(key, value, seconds);
            let output = result.map_err(|e| Error::OperationFailed {
                operation: "shared_set".to_string(),
                cause: e.to_string(),
            });
            self.return_connection(conn);
            output
        }

        /// Removes the entry stored under `key`.
        ///
        /// # Errors
        ///
        /// Returns an error if the command fails.
        pub fn delete(&self, key: &str) -> Result<()> {
            let mut conn = self.get_connection()?;

            let result: redis::RedisResult<i64> = conn.del(key);
            let output = result.map(|_| ()).map_err(|e| Error::OperationFailed {
                operation: "shared_delete".to_string(),
                cause: e.to_string(),
            });
            self.return_connection(conn);
            output
        }

        /// Removes every key matching `pattern` (glob syntax, e.g.
        /// `course:*`).
        ///
        /// Keys are collected with `SCAN MATCH` and deleted individually; a
        /// failure deleting one key is logged and does not stop the rest.
        ///
        /// # Errors
        ///
        /// Returns an error if the scan itself fails.
        pub fn delete_pattern(&self, pattern: &str) -> Result<()> {
            let mut conn = self.get_connection()?;

            let scanned: redis::RedisResult<Vec<String>> =
                conn.scan_match(pattern).and_then(|iter| iter.collect());
            let keys = match scanned {
                Ok(keys) => keys,
                Err(e) => {
                    self.return_connection(conn);
                    return Err(Error::OperationFailed {
                        operation: "shared_scan".to_string(),
                        cause: e.to_string(),
                    });
                },
            };

            for key in keys {
                let result: redis::RedisResult<i64> = conn.del(&key);
                if let Err(e) = result {
                    tracing::warn!(key, error = %e, "shared delete-pattern failed for key");
                }
            }

            self.return_connection(conn);
            Ok(())
        }

        /// Removes all entries from the shared tier's database.
        ///
        /// # Errors
        ///
        /// Returns an error if the command fails.
        pub fn clear(&self) -> Result<()> {
            let mut conn = self.get_connection()?;

            let result: redis::RedisResult<()> = redis::cmd("FLUSHDB").query(&mut conn);
            let output = result.map_err(|e| Error::OperationFailed {
                operation: "shared_clear".to_string(),
                cause: e.to_string(),
            });
            self.return_connection(conn);
            output
        }

        /// Bounded-timeout liveness probe.
        ///
        /// Intended for external monitoring, not internal retry logic: a
        /// failed probe does not change how the cache behaves.
        ///
        /// # Errors
        ///
        /// Returns an error if the ping fails or times out.
        pub fn health_check(&self) -> Result<()> {
            let mut conn = self.get_connection()?;

            let result: redis::RedisResult<String> = redis::cmd("PING").query(&mut conn);
            let output = result.map(|_| ()).map_err(|e| Error::OperationFailed {
                operation: "shared_health_check".to_string(),
                cause: e.to_string(),
            });
            self.return_connection(conn);
            output
        }
    }
}

#[cfg(feature = "redis")]
pub use implementation::SharedCacheClient;

#[cfg(not(feature = "redis"))]
mod stub {
    use crate::{Error, Result};
    use std::time::Duration;

    /// Stub shared cache client when the `redis` feature is not enabled.
    ///
    /// `connect` always fails, so a configuration that enables the shared
    /// tier on this build degrades exactly like an unreachable server:
    /// permanent local-only fallback.
    pub struct SharedCacheClient;

    impl SharedCacheClient {
        /// Attempts to connect to the shared cache (stub).
        ///
        /// # Errors
        ///
        /// Always returns an error because the feature is not enabled.
        pub fn connect(_endpoint: &str, _connect_timeout: Duration) -> Result<Self> {
            Err(Error::FeatureNotEnabled("redis".to_string()))
        }

        /// Retrieves a value (stub).
        ///
        /// # Errors
        ///
        /// Always returns an error because the feature is not enabled.
        pub fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Err(Error::FeatureNotEnabled("redis".to_string()))
        }

        /// Stores a value (stub).
        ///
        /// # Errors
        ///
        /// Always returns an error because the feature is not enabled.
        pub fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> Result<()> {
            Err(Error::FeatureNotEnabled("redis".to_string()))
        }

        /// Removes a key (stub).
        ///
        /// # Errors
        ///
        /// Always returns an error because the feature is not enabled.
        pub fn delete(&self, _key: &str) -> Result<()> {
            Err(Error::FeatureNotEnabled("redis".to_string()))
        }

        /// Removes keys by pattern (stub).
        ///
        /// # Errors
        ///
        /// Always returns an error because the feature is not enabled.
        pub fn delete_pattern(&self, _pattern: &str) -> Result<()> {
            Err(Error::FeatureNotEnabled("redis".to_string()))
        }

        /// Clears all entries (stub).
        ///
        /// # Errors
        ///
        /// Always returns an error because the feature is not enabled.
        pub fn clear(&self) -> Result<()> {
            Err(Error::FeatureNotEnabled("redis".to_string()))
        }

        /// Liveness probe (stub).
        ///
        /// # Errors
        ///
        /// Always returns an error because the feature is not enabled.
        pub fn health_check(&self) -> Result<()> {
            Err(Error::FeatureNotEnabled("redis".to_string()))
        }
    }
}

#[cfg(not(feature = "redis"))]
pub use stub::SharedCacheClient;
