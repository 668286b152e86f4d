//! Domain-specific error types for authentication, tokens, and verification
//!
//! Messages here are the ones returned to clients; the stable machine-readable
//! codes live on [`DomainError::error_code`](super::DomainError::error_code).

use thiserror::Error;

/// Request authentication failures raised by the gates in front of handlers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Not authorized, no token")]
    MissingBearerToken,

    #[error("Not authorized, token failed")]
    InvalidBearerToken,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Not authorized as an admin")]
    AdminRequired,
}

/// Signed token failures
///
/// Every verification failure (bad signature, malformed token, wrong purpose,
/// expiry) collapses into [`TokenError::InvalidToken`] so callers cannot
/// distinguish them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Contact-channel verification failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("User not found")]
    UserNotFound,

    #[error("User {channel} already verified")]
    AlreadyVerified { channel: String },

    #[error("Token expired or not found")]
    ExpiredOrMissing,

    #[error("Invalid verification token")]
    TokenMismatch,

    #[error("Incorrect Otp")]
    CodeMismatch,

    #[error("Notification delivery unavailable")]
    DeliveryUnavailable,
}

impl VerificationError {
    /// Shorthand for an already verified email address
    pub fn email_already_verified() -> Self {
        Self::AlreadyVerified { channel: "email".to_string() }
    }

    /// Shorthand for an already verified phone number
    pub fn phone_already_verified() -> Self {
        Self::AlreadyVerified { channel: "phone".to_string() }
    }
}
