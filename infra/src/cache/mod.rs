//! Cache module for the ephemeral verification store
//!
//! This module provides the Redis client (connection management, retry
//! logic, basic key operations) and the [`EphemeralStore`] implementations
//! built on top of it.
//!
//! [`EphemeralStore`]: th_core::services::verification::EphemeralStore

pub mod ephemeral_store;
pub mod memory_store;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use ephemeral_store::RedisEphemeralStore;
pub use memory_store::InMemoryEphemeralStore;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use th_shared::config::cache::CacheConfig;
