//! Bounded, channel-backed notification dispatcher

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

use crate::domain::entities::notification::NotificationMessage;
use crate::errors::{DomainResult, VerificationError};

use super::traits::NotificationPort;

/// Queues notifications on a bounded channel drained by a background worker
///
/// `publish` never waits on the downstream queue: it either enqueues the
/// message or fails immediately with `DeliveryUnavailable` when the channel
/// is full or the worker is gone. The worker bounds every downstream publish
/// with a timeout and logs the outcome.
#[derive(Clone)]
pub struct NotificationDispatcher {
    sender: mpsc::Sender<NotificationMessage>,
}

impl NotificationDispatcher {
    /// Spawns the worker on the current tokio runtime
    ///
    /// The worker exits once every dispatcher clone has been dropped and the
    /// channel is drained; await the returned handle to flush on shutdown.
    pub fn spawn<P>(port: Arc<P>, capacity: usize, publish_timeout: Duration) -> (Self, JoinHandle<()>)
    where
        P: NotificationPort + ?Sized + 'static,
    {
        let (sender, mut receiver) = mpsc::channel::<NotificationMessage>(capacity.max(1));

        let handle = tokio::spawn(async move {
            while let Some(message) = receiver.recv().await {
                let channel = message.channel;
                let template = message.template.clone();

                match tokio::time::timeout(publish_timeout, port.publish(message)).await {
                    Ok(Ok(())) => {
                        tracing::info!(%channel, %template, event = "notification_published", "Notification handed off");
                    }
                    Ok(Err(e)) => {
                        tracing::error!(%channel, %template, error = %e, event = "notification_failed", "Failed to publish notification");
                    }
                    Err(_) => {
                        tracing::error!(
                            %channel,
                            %template,
                            timeout_ms = publish_timeout.as_millis() as u64,
                            event = "notification_timeout",
                            "Timed out publishing notification"
                        );
                    }
                }
            }
            tracing::debug!("Notification dispatcher stopped");
        });

        (Self { sender }, handle)
    }
}

#[async_trait]
impl NotificationPort for NotificationDispatcher {
    async fn publish(&self, message: NotificationMessage) -> DomainResult<()> {
        let channel = message.channel;
        self.sender.try_send(message).map_err(|e| {
            let reason = match e {
                TrySendError::Full(_) => "full",
                TrySendError::Closed(_) => "closed",
            };
            tracing::warn!(%channel, reason, event = "notification_rejected", "Notification channel unavailable");
            VerificationError::DeliveryUnavailable.into()
        })
    }
}
