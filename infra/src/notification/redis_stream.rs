//! Redis Streams notification publisher

use async_trait::async_trait;
use th_core::errors::{DomainResult, VerificationError};
use th_core::services::notification::NotificationPort;
use th_core::NotificationMessage;

use crate::cache::RedisClient;

/// Appends each message to a Redis stream with `XADD <stream> * ...`
///
/// Entries carry two fields: `type`, the delivery channel, and `body`, the
/// JSON message the delivery workers consume.
#[derive(Clone)]
pub struct RedisStreamQueue {
    client: RedisClient,
    stream_key: String,
}

impl RedisStreamQueue {
    pub fn new(client: RedisClient, stream_key: impl Into<String>) -> Self {
        Self {
            client,
            stream_key: stream_key.into(),
        }
    }

    pub fn stream_key(&self) -> &str {
        &self.stream_key
    }
}

#[async_trait]
impl NotificationPort for RedisStreamQueue {
    async fn publish(&self, message: NotificationMessage) -> DomainResult<()> {
        let body = message.to_wire_json().map_err(|e| {
            tracing::error!(error = %e, "Failed to serialize notification");
            VerificationError::DeliveryUnavailable
        })?;

        let mut conn = self.client.connection();
        let entry_id: String = redis::cmd("XADD")
            .arg(&self.stream_key)
            .arg("*")
            .arg("type")
            .arg(message.channel.as_str())
            .arg("body")
            .arg(&body)
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                tracing::error!(stream = %self.stream_key, error = %e, "XADD failed");
                VerificationError::DeliveryUnavailable
            })?;

        tracing::debug!(stream = %self.stream_key, %entry_id, channel = %message.channel, "Notification appended");
        Ok(())
    }
}
