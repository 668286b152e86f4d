//! Notification queue publishers
//!
//! Verification workflows hand messages to a [`NotificationPort`]; the
//! implementations here append them to the delivery queue consumed by the
//! email and SMS workers, or just log them during development.

pub mod log_queue;
pub mod redis_stream;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use th_core::services::notification::NotificationPort;
use th_shared::config::cache::CacheConfig;
use th_shared::config::notification::{NotificationConfig, NotificationProvider};

use crate::cache::RedisClient;
use crate::InfrastructureError;

pub use log_queue::LoggingNotificationQueue;
pub use redis_stream::RedisStreamQueue;

/// Build the publisher selected by `config.provider`
pub async fn create_notification_port(
    config: &NotificationConfig,
) -> Result<Arc<dyn NotificationPort>, InfrastructureError> {
    match config.provider {
        NotificationProvider::Redis => {
            let client = RedisClient::new(CacheConfig::new(config.queue_url.as_str())).await?;
            tracing::info!(stream = %config.queue_name, "Publishing notifications to Redis stream");
            Ok(Arc::new(RedisStreamQueue::new(client, config.queue_name.as_str())))
        }
        NotificationProvider::Log => {
            tracing::warn!("Notification queue disabled; messages will only be logged");
            Ok(Arc::new(LoggingNotificationQueue::new()))
        }
    }
}
