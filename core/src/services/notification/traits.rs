//! Trait for notification queue integration

use async_trait::async_trait;

use crate::domain::entities::notification::NotificationMessage;
use crate::errors::DomainResult;

/// Fire-and-forget publisher of notification messages
///
/// `Ok(())` means the message was handed off to the delivery subsystem, not
/// that it was delivered. Failures are reported as
/// [`VerificationError::DeliveryUnavailable`](crate::errors::VerificationError::DeliveryUnavailable).
#[async_trait]
pub trait NotificationPort: Send + Sync {
    async fn publish(&self, message: NotificationMessage) -> DomainResult<()>;
}

