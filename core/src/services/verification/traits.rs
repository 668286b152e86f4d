//! Trait for the ephemeral verification store

use async_trait::async_trait;

use crate::errors::DomainResult;

/// Key-value store with per-key expiry holding pending verification secrets
///
/// `put` overwrites any existing value and resets its TTL. A missing or
/// expired key is reported as `Ok(None)`, never as an error.
#[async_trait]
pub trait EphemeralStore: Send + Sync {
    /// Store `value` under `key` for `ttl_seconds`
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> DomainResult<()>;
    /// Fetch the live value under `key`
    async fn get(&self, key: &str) -> DomainResult<Option<String>>;
    /// Remove `key` (no-op when absent)
    async fn delete(&self, key: &str) -> DomainResult<()>;
}
