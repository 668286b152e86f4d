//! Domain entities representing core business objects.

pub mod notification;
pub mod token;
pub mod user;
pub mod verification;


// Re-export commonly used types
pub use notification::{NotificationChannel, NotificationMessage};
pub use token::{Claims, EmailVerificationClaims, SessionClaims, TokenPurpose};
pub use user::User;
pub use verification::VerificationPurpose;
