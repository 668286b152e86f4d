//! Domain layer containing business entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::{
    Claims, EmailVerificationClaims, NotificationChannel, NotificationMessage, SessionClaims,
    TokenPurpose, User, VerificationPurpose,
};
