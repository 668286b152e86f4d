//! Email verification workflow

use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::notification::{
    NotificationMessage, CONFIRM_EMAIL_TEMPLATE, VERIFIED_EMAIL_SUCCESS_TEMPLATE,
};
use crate::domain::entities::user::User;
use crate::domain::entities::verification::VerificationPurpose;
use crate::errors::{DomainResult, VerificationError};
use crate::repositories::UserRepository;
use crate::services::notification::NotificationPort;
use crate::services::token::TokenCodec;

use super::config::VerificationServiceConfig;
use super::log_failure;
use super::traits::EphemeralStore;
use super::types::VerifiedEmail;

const VERIFY_EMAIL_SUBJECT: &str = "Verify Your Email Address";
const VERIFIED_EMAIL_SUBJECT: &str = "Email Verification Successful";

/// Issues single-use verification links and consumes them exactly once
pub struct EmailVerificationService<U, S, N>
where
    U: UserRepository,
    S: EphemeralStore,
    N: NotificationPort,
{
    users: Arc<U>,
    store: Arc<S>,
    notifier: Arc<N>,
    codec: Arc<TokenCodec>,
    config: VerificationServiceConfig,
}

impl<U, S, N> EmailVerificationService<U, S, N>
where
    U: UserRepository,
    S: EphemeralStore,
    N: NotificationPort,
{
    /// Create a new email verification service
    ///
    /// # Arguments
    ///
    /// * `users` - User record store
    /// * `store` - Store for the pending link token
    /// * `notifier` - Publisher for the outbound emails
    /// * `codec` - Token codec; its email TTL is also the record TTL
    /// * `config` - Workflow configuration
    pub fn new(
        users: Arc<U>,
        store: Arc<S>,
        notifier: Arc<N>,
        codec: Arc<TokenCodec>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            users,
            store,
            notifier,
            codec,
            config,
        }
    }

    /// Send a fresh verification link to the user's email address
    ///
    /// Any previously issued link stops working. A failure to publish the
    /// email is logged and does not fail the call.
    pub async fn send_verification_link(&self, user_id: Uuid) -> DomainResult<()> {
        self.issue_link(user_id)
            .await
            .map_err(|e| log_failure("send_email_verification_link", user_id, e))
    }

    async fn issue_link(&self, user_id: Uuid) -> DomainResult<()> {
        let user = self.load_unverified_user(user_id).await?;

        let encoded = self.codec.issue_email_token(user.id)?;
        let key = VerificationPurpose::Email.record_key(user.id);
        self.store
            .put(&key, &encoded, self.codec.config().email_ttl_seconds)
            .await?;

        let link = format!("{}?token={}", self.config.email_verification_url, encoded);
        let message = NotificationMessage::email(
            &user.email,
            VERIFY_EMAIL_SUBJECT,
            CONFIRM_EMAIL_TEMPLATE,
            json!({ "link": link, "name": user.user_name }),
        );

        match self.notifier.publish(message).await {
            Ok(()) => tracing::info!(
                user_id = %user.id,
                event = "email_verification_link_sent",
                "Email verification link queued"
            ),
            Err(e) => tracing::error!(
                user_id = %user.id,
                error = %e,
                event = "email_verification_link_not_sent",
                "Error sending verification link email"
            ),
        }

        Ok(())
    }

    /// Consume a verification link token
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedEmail)` - The flag was flipped by this call
    /// * `Err(DomainError)` - `InvalidToken`, `UserNotFound`, `AlreadyVerified`,
    ///   `ExpiredOrMissing` or `TokenMismatch`, or a store/database failure
    pub async fn verify_email(&self, raw_token: &str) -> DomainResult<VerifiedEmail> {
        let user_id = self.codec.verify_email_token(raw_token).map_err(|e| {
            tracing::warn!(
                operation = "verify_email",
                error = %e,
                "Rejected email verification token"
            );
            e
        })?;

        self.confirm(user_id, raw_token)
            .await
            .map_err(|e| log_failure("verify_email", user_id, e))
    }

    async fn confirm(&self, user_id: Uuid, raw_token: &str) -> DomainResult<VerifiedEmail> {
        let user = self.load_unverified_user(user_id).await?;

        let key = VerificationPurpose::Email.record_key(user.id);
        let stored = self
            .store
            .get(&key)
            .await?
            .ok_or(VerificationError::ExpiredOrMissing)?;

        if !constant_time_eq(stored.as_bytes(), raw_token.as_bytes()) {
            return Err(VerificationError::TokenMismatch.into());
        }

        if !self.users.mark_email_verified(user.id).await? {
            return Err(VerificationError::email_already_verified().into());
        }

        // The flag is committed; a stale record simply expires
        if let Err(e) = self.store.delete(&key).await {
            tracing::error!(user_id = %user.id, error = %e, "Failed to delete email verification record");
        }

        let notice = NotificationMessage::email(
            &user.email,
            VERIFIED_EMAIL_SUBJECT,
            VERIFIED_EMAIL_SUCCESS_TEMPLATE,
            json!({ "name": user.user_name }),
        );
        if let Err(e) = self.notifier.publish(notice).await {
            tracing::error!(
                user_id = %user.id,
                error = %e,
                event = "email_verified_notice_not_sent",
                "Error sending email verification success notice"
            );
        }

        tracing::info!(user_id = %user.id, event = "email_verified", "Email verified");

        Ok(VerifiedEmail {
            id: user.id,
            user_name: user.user_name,
            email: user.email,
        })
    }

    async fn load_unverified_user(&self, user_id: Uuid) -> DomainResult<User> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(VerificationError::UserNotFound)?;

        if user.is_verified(VerificationPurpose::Email) {
            return Err(VerificationError::email_already_verified().into());
        }

        Ok(user)
    }
}
