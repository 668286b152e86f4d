//! Logging notification publisher for development

use async_trait::async_trait;
use th_core::errors::DomainResult;
use th_core::services::notification::NotificationPort;
use th_core::NotificationMessage;

/// Writes each message to the log instead of a queue
///
/// Phone codes and email links end up in the log verbatim, so this must not
/// be used in production.
#[derive(Debug, Clone, Default)]
pub struct LoggingNotificationQueue;

impl LoggingNotificationQueue {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationPort for LoggingNotificationQueue {
    async fn publish(&self, message: NotificationMessage) -> DomainResult<()> {
        tracing::info!(
            channel = %message.channel,
            template = %message.template,
            payload = %message.payload,
            "[MOCK NOTIFICATION] not delivered"
        );
        Ok(())
    }
}
