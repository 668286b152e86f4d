//! Business services containing domain logic and use cases.

pub mod notification;
pub mod token;
pub mod verification;

// Re-export commonly used types
pub use notification::{NotificationDispatcher, NotificationPort};
pub use token::{TokenCodec, TokenCodecConfig};
pub use verification::{
    EmailVerificationService, EphemeralStore, PhoneVerificationService,
    VerificationServiceConfig, VerifiedEmail,
};
