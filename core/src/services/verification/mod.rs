//! Contact-channel verification workflows
//!
//! This module provides the two "prove you own this channel" workflows:
//! - Email: a signed, single-use link whose token is mirrored in the store
//! - Phone: a numeric OTP with a fixed lifetime, delivered by SMS
//!
//! Both keep exactly one pending record per (purpose, user) in an
//! [`EphemeralStore`]; re-initiating overwrites it.

mod config;
mod email;
mod phone;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use email::EmailVerificationService;
pub use phone::{generate_otp, PhoneVerificationService};
pub use traits::EphemeralStore;
pub use types::VerifiedEmail;

use uuid::Uuid;

use crate::errors::DomainError;

/// Log a workflow failure with its actor and operation, then hand it back
fn log_failure(operation: &'static str, user_id: Uuid, error: DomainError) -> DomainError {
    if error.is_client_error() {
        tracing::warn!(%user_id, operation, code = error.error_code(), error = %error, "Verification rejected");
    } else {
        tracing::error!(%user_id, operation, code = error.error_code(), error = %error, "Verification failed");
    }
    error
}
