//! Outbound notification messages.
//!
//! Messages are handed to a delivery subsystem that renders the template and
//! talks to the email/SMS providers. The wire shape is:
//!
//! ```json
//! {
//!   "notifyBy": ["email"],
//!   "email": "ada@example.com",
//!   "subject": "Verify Your Email Address",
//!   "template": "confirm_email",
//!   "data": { "link": "...", "name": "ada" }
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Email template for the verification link
pub const CONFIRM_EMAIL_TEMPLATE: &str = "confirm_email";

/// Email template for the confirmation success notice
pub const VERIFIED_EMAIL_SUCCESS_TEMPLATE: &str = "verified_email_success";

/// SMS template for the phone code
pub const PHONE_VERIFICATION_TEMPLATE: &str = "phone_verification";

/// Delivery channel of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationChannel {
    Email,
    Sms,
}

impl NotificationChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationChannel::Email => "email",
            NotificationChannel::Sms => "sms",
        }
    }
}

impl fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single fire-and-forget notification
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationMessage {
    pub channel: NotificationChannel,
    /// Email address or phone number, depending on `channel`
    pub recipient: String,
    pub subject: Option<String>,
    pub template: String,
    pub payload: serde_json::Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireMessage<'a> {
    notify_by: [NotificationChannel; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<&'a str>,
    template: &'a str,
    data: &'a serde_json::Value,
}

impl NotificationMessage {
    /// Email notification
    pub fn email(
        recipient: impl Into<String>,
        subject: impl Into<String>,
        template: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            channel: NotificationChannel::Email,
            recipient: recipient.into(),
            subject: Some(subject.into()),
            template: template.into(),
            payload,
        }
    }

    /// SMS notification
    pub fn sms(
        recipient: impl Into<String>,
        template: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            channel: NotificationChannel::Sms,
            recipient: recipient.into(),
            subject: None,
            template: template.into(),
            payload,
        }
    }

    /// Serialize into the wire body consumed by the delivery workers
    pub fn to_wire_json(&self) -> serde_json::Result<String> {
        let recipient = self.recipient.as_str();
        let wire = WireMessage {
            notify_by: [self.channel],
            email: (self.channel == NotificationChannel::Email).then_some(recipient),
            phone: (self.channel == NotificationChannel::Sms).then_some(recipient),
            subject: self.subject.as_deref(),
            template: &self.template,
            data: &self.payload,
        };
        serde_json::to_string(&wire)
    }
}
