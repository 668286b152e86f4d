//! User verification endpoints under `/api/v1/user`
//!
//! - `GET  /send-email-verification-link` (API key + bearer)
//! - `GET  /verify-email?token=...` (API key)
//! - `GET  /send-phone-verification-code` (API key + bearer)
//! - `POST /verify-phone` (API key + bearer)

pub mod email;
pub mod phone;

use std::sync::Arc;

use th_core::repositories::UserRepository;
use th_core::services::notification::NotificationPort;
use th_core::services::token::TokenCodec;
use th_core::services::verification::{
    EmailVerificationService, EphemeralStore, PhoneVerificationService, VerificationServiceConfig,
};

pub use email::{send_email_verification_link, verify_email};
pub use phone::{send_phone_verification_code, verify_phone};

/// Application state that holds the verification workflows
pub struct AppState<U, S, N>
where
    U: UserRepository,
    S: EphemeralStore,
    N: NotificationPort,
{
    pub email_verification: Arc<EmailVerificationService<U, S, N>>,
    pub phone_verification: Arc<PhoneVerificationService<U, S, N>>,
}

impl<U, S, N> AppState<U, S, N>
where
    U: UserRepository,
    S: EphemeralStore,
    N: NotificationPort,
{
    /// Build both workflows over the same collaborators
    pub fn new(
        users: Arc<U>,
        store: Arc<S>,
        notifier: Arc<N>,
        codec: Arc<TokenCodec>,
        config: VerificationServiceConfig,
    ) -> Self {
        let email_verification = Arc::new(EmailVerificationService::new(
            Arc::clone(&users),
            Arc::clone(&store),
            Arc::clone(&notifier),
            codec,
            config.clone(),
        ));
        let phone_verification = Arc::new(PhoneVerificationService::new(users, store, notifier, config));

        Self {
            email_verification,
            phone_verification,
        }
    }
}
