//! Phone verification workflow

use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde_json::json;
use th_shared::phone::{
    format_with_country_code, is_valid_international_phone, mask_phone_number, normalize_phone_number,
};
use uuid::Uuid;

use crate::domain::entities::notification::{NotificationMessage, PHONE_VERIFICATION_TEMPLATE};
use crate::domain::entities::user::User;
use crate::domain::entities::verification::VerificationPurpose;
use crate::errors::{DomainError, DomainResult, VerificationError};
use crate::repositories::UserRepository;
use crate::services::notification::NotificationPort;

use super::config::VerificationServiceConfig;
use super::log_failure;
use super::traits::EphemeralStore;

/// Generate a numeric OTP of `length` digits from the OS CSPRNG
///
/// Leading zeros are kept, so every code has exactly `length` digits.
pub fn generate_otp(length: usize) -> String {
    let length = length.clamp(1, 9);
    let upper = 10u32.pow(length as u32);
    let code = OsRng.gen_range(0..upper);
    format!("{:0width$}", code, width = length)
}

/// Issues numeric one-time codes by SMS and consumes them exactly once
///
/// There is no failed-attempt counter: a code can be guessed at until it
/// expires.
pub struct PhoneVerificationService<U, S, N>
where
    U: UserRepository,
    S: EphemeralStore,
    N: NotificationPort,
{
    users: Arc<U>,
    store: Arc<S>,
    notifier: Arc<N>,
    config: VerificationServiceConfig,
}

impl<U, S, N> PhoneVerificationService<U, S, N>
where
    U: UserRepository,
    S: EphemeralStore,
    N: NotificationPort,
{
    /// Create a new phone verification service
    pub fn new(
        users: Arc<U>,
        store: Arc<S>,
        notifier: Arc<N>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            users,
            store,
            notifier,
            config,
        }
    }

    /// Send a fresh code to the user's phone
    ///
    /// # Returns
    ///
    /// * `Ok(Some(code))` - Outside production, so clients can test without SMS
    /// * `Ok(None)` - In production
    pub async fn send_verification_code(&self, user_id: Uuid) -> DomainResult<Option<String>> {
        self.issue_code(user_id)
            .await
            .map_err(|e| log_failure("send_phone_verification_code", user_id, e))
    }

    async fn issue_code(&self, user_id: Uuid) -> DomainResult<Option<String>> {
        let user = self.load_unverified_user(user_id).await?;
        let phone = user
            .phone
            .as_deref()
            .filter(|phone| normalize_phone_number(phone).chars().any(|c| c.is_ascii_digit()))
            .ok_or_else(|| DomainError::Validation {
                message: "User has no phone number".to_string(),
            })?;

        let recipient = format_with_country_code(&self.config.sms_country_code, phone);
        if !is_valid_international_phone(&recipient) {
            return Err(DomainError::Validation {
                message: "User phone number is not a valid international number".to_string(),
            });
        }

        let code = generate_otp(self.config.otp_length);
        let key = VerificationPurpose::Phone.record_key(user.id);
        self.store.put(&key, &code, self.config.otp_ttl_seconds).await?;

        let text = format!(
            "Please, confirm your registered phone number on {} with this code {}",
            self.config.app_name, code
        );
        let message = NotificationMessage::sms(
            &recipient,
            PHONE_VERIFICATION_TEMPLATE,
            json!({ "message": text }),
        );

        match self.notifier.publish(message).await {
            Ok(()) => tracing::info!(
                user_id = %user.id,
                phone = %mask_phone_number(&recipient),
                event = "otp_generated",
                "Phone verification code queued"
            ),
            Err(e) => tracing::error!(
                user_id = %user.id,
                phone = %mask_phone_number(&recipient),
                error = %e,
                event = "otp_not_sent",
                "Error sending phone verification code"
            ),
        }

        Ok(self.config.expose_otp.then_some(code))
    }

    /// Consume a phone code
    ///
    /// Fails with `UserNotFound`, `AlreadyVerified`, `ExpiredOrMissing` or
    /// `CodeMismatch`; the verified flag is only flipped on a match.
    pub async fn verify_phone(&self, user_id: Uuid, code: &str) -> DomainResult<()> {
        self.confirm(user_id, code)
            .await
            .map_err(|e| log_failure("verify_phone", user_id, e))
    }

    async fn confirm(&self, user_id: Uuid, code: &str) -> DomainResult<()> {
        let user = self.load_unverified_user(user_id).await?;

        let key = VerificationPurpose::Phone.record_key(user.id);
        let stored = self
            .store
            .get(&key)
            .await?
            .ok_or(VerificationError::ExpiredOrMissing)?;

        if !constant_time_eq(stored.as_bytes(), code.as_bytes()) {
            return Err(VerificationError::CodeMismatch.into());
        }

        if !self.users.mark_phone_verified(user.id).await? {
            return Err(VerificationError::phone_already_verified().into());
        }

        if let Err(e) = self.store.delete(&key).await {
            tracing::error!(user_id = %user.id, error = %e, "Failed to delete phone verification record");
        }

        tracing::info!(user_id = %user.id, event = "otp_verified_success", "Phone verified");
        Ok(())
    }

    async fn load_unverified_user(&self, user_id: Uuid) -> DomainResult<User> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(VerificationError::UserNotFound)?;

        if user.is_verified(VerificationPurpose::Phone) {
            return Err(VerificationError::phone_already_verified().into());
        }

        Ok(user)
    }
}
