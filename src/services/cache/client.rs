//! Cache client interface used by higher-level services (mail cooldowns, etc.).
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache-layer errors (transport/command).
///
/// Kept independent from `AppError` so callers decide how to fail.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    BackendConnection(String),
    #[error("cache command error: {0}")]
    BackendCommand(String),
}

/// A minimal, string-based cache interface.
///
/// Shared as `Arc<dyn CacheClient>` in `AppState`.
#[async_trait]
pub trait CacheClient: Send + Sync + 'static {
    /// Returns the cache backend name (for logging).
    fn backend_name(&self) -> &'static str;

    /// Set value if the key does not exist, with TTL.
    ///
    /// Returns:
    /// - `Ok(true)`  if the key was set (not seen before)
    /// - `Ok(false)` if the key already exists
    async fn set_if_absent_with_ttl(
        &self,
        key: &str,
        value: &str,
        ttl: Duration,
    ) -> CacheResult<bool>;

    /// Delete a key. Returns number of deleted keys.
    async fn del(&self, key: &str) -> CacheResult<u64>;
}
