//! Redis-backed ephemeral verification store

use async_trait::async_trait;
use th_core::errors::DomainResult;
use th_core::services::verification::EphemeralStore;

use super::RedisClient;

/// [`EphemeralStore`] over Redis `SET EX` / `GET` / `DEL`
///
/// Expiry is enforced by Redis itself, so an expired record reads back as
/// `None` with no clean-up needed here.
#[derive(Clone)]
pub struct RedisEphemeralStore {
    client: RedisClient,
}

impl RedisEphemeralStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    fn key(&self, key: &str) -> String {
        self.client.config().prefixed_key(key)
    }
}

#[async_trait]
impl EphemeralStore for RedisEphemeralStore {
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> DomainResult<()> {
        // `SET EX 0` is rejected by Redis
        let ttl = ttl_seconds.max(1);
        self.client
            .set_with_expiry(&self.key(key), value, ttl)
            .await
            .map_err(Into::into)
    }

    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(self.client.get(&self.key(key)).await?)
    }

    async fn delete(&self, key: &str) -> DomainResult<()> {
        self.client.delete(&self.key(key)).await?;
        Ok(())
    }
}
