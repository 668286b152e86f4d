//! Process-local ephemeral store for development and tests

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use th_core::errors::DomainResult;
use th_core::services::verification::EphemeralStore;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// [`EphemeralStore`] backed by a map with lazy expiry
///
/// Expired entries are dropped when they are next read, and every `put`
/// sweeps the ones nobody read. Nothing is shared between processes, so this
/// is only suitable for a single instance.
#[derive(Clone, Default)]
pub struct InMemoryEphemeralStore {
    entries: Arc<RwLock<HashMap<String, Entry>>>,
}

struct Entry {
    value: String,
    expires_at: Instant,
}

impl InMemoryEphemeralStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries held, including expired ones not yet swept
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl EphemeralStore for InMemoryEphemeralStore {
    async fn put(&self, key: &str, value: &str, ttl_seconds: u64) -> DomainResult<()> {
        let now = Instant::now();
        let entry = Entry {
            value: value.to_string(),
            expires_at: now + Duration::from_secs(ttl_seconds),
        };

        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| now < entry.expires_at);
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> DomainResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
