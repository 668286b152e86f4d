//! User entity as seen by the verification workflows.
//!
//! The user record itself is owned elsewhere; this core reads the contact
//! details and flips exactly one verified flag per confirmation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::verification::VerificationPurpose;

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name used in outbound messages
    pub user_name: String,

    /// Email address the verification link is sent to
    pub email: String,

    /// Phone number as stored on the profile (may be local format)
    pub phone: Option<String>,

    /// Whether the email address has been verified
    pub is_email_verified: bool,

    /// Whether the phone number has been verified
    pub is_phone_verified: bool,

    /// Whether the user may call admin-only endpoints
    pub is_admin: bool,
}

impl User {
    /// Creates a new unverified, non-admin user
    pub fn new(user_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_name: user_name.into(),
            email: email.into(),
            phone: None,
            is_email_verified: false,
            is_phone_verified: false,
            is_admin: false,
        }
    }

    /// Sets the phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Grants admin rights
    pub fn as_admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    /// Whether the channel behind `purpose` is already verified
    pub fn is_verified(&self, purpose: VerificationPurpose) -> bool {
        match purpose {
            VerificationPurpose::Email => self.is_email_verified,
            VerificationPurpose::Phone => self.is_phone_verified,
        }
    }
}
