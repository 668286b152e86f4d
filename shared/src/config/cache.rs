//! Cache configuration module
//!
//! The cache backs the ephemeral verification store: pending email tokens and
//! phone codes live here with a server-enforced TTL.

use serde::{Deserialize, Serialize};

/// Which ephemeral store implementation to wire up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    /// Redis (production)
    Redis,
    /// Process-local map (development and tests)
    Memory,
}

impl std::str::FromStr for StoreProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(StoreProvider::Redis),
            "memory" | "in-memory" => Ok(StoreProvider::Memory),
            _ => Err(format!("Invalid store provider: {}", s)),
        }
    }
}

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Store implementation
    pub provider: StoreProvider,

    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Response timeout in seconds
    pub response_timeout: u64,

    /// Optional key prefix prepended to every key
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            provider: StoreProvider::Redis,
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            response_timeout: 2,
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let provider = std::env::var("CACHE_PROVIDER")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.provider);
        let url = std::env::var("REDIS_URL").unwrap_or(defaults.url);
        let key_prefix = std::env::var("REDIS_KEY_PREFIX").ok().filter(|p| !p.is_empty());

        Self {
            provider,
            url,
            key_prefix,
            ..defaults
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Apply the configured prefix to a key
    pub fn prefixed_key(&self, key: &str) -> String {
        match &self.key_prefix {
            Some(prefix) => format!("{}:{}", prefix, key),
            None => key.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_key() {
        let mut config = CacheConfig::new("redis://cache:6379");
        assert_eq!(config.prefixed_key("phone_verification_1"), "phone_verification_1");

        config.key_prefix = Some("taskhub".to_string());
        assert_eq!(
            config.prefixed_key("phone_verification_1"),
            "taskhub:phone_verification_1"
        );
    }

    #[test]
    fn test_store_provider_from_str() {
        assert_eq!("redis".parse::<StoreProvider>().unwrap(), StoreProvider::Redis);
        assert_eq!("Memory".parse::<StoreProvider>().unwrap(), StoreProvider::Memory);
        assert!("memcached".parse::<StoreProvider>().is_err());
    }
}
