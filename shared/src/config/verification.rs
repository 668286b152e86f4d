//! Contact-channel verification policy
//!
//! Email links carry a signed token whose lifetime doubles as the TTL of the
//! pending record; phone codes are short numeric OTPs with a fixed TTL.

use serde::{Deserialize, Serialize};

/// Shortest OTP a deployment may configure
pub const MIN_OTP_LENGTH: usize = 4;

/// Longest OTP a deployment may configure
pub const MAX_OTP_LENGTH: usize = 6;

/// Lifetime of a pending phone code
pub const PHONE_CODE_TTL_SECONDS: u64 = 300;

/// Verification workflow configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Lifetime of the signed email verification token (and its pending record)
    pub email_token_ttl_seconds: u64,

    /// Absolute URL of the email confirmation endpoint; the token is appended as `?token=`
    pub email_verification_url: String,

    /// Number of digits in a phone OTP (4..=6)
    pub otp_length: usize,

    /// Lifetime of a pending phone code
    pub otp_ttl_seconds: u64,

    /// Country calling code applied to local phone numbers (without `+`)
    pub sms_country_code: String,

    /// Product name used in outbound message texts
    pub app_name: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            email_token_ttl_seconds: 86400, // 24 hours
            email_verification_url: String::from(
                "http://localhost:8080/api/v1/user/verify-email",
            ),
            otp_length: MAX_OTP_LENGTH,
            otp_ttl_seconds: PHONE_CODE_TTL_SECONDS,
            sms_country_code: String::from("234"),
            app_name: String::from("TaskHub"),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables, deriving the link base from the public URL
    pub fn from_env(public_url: &str) -> Self {
        let defaults = Self::default();
        let email_token_ttl_seconds = std::env::var("EMAIL_VERIFICATION_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.email_token_ttl_seconds);
        let email_verification_url = std::env::var("EMAIL_VERIFICATION_URL").unwrap_or_else(|_| {
            format!(
                "{}/api/v1/user/verify-email",
                public_url.trim_end_matches('/')
            )
        });
        let otp_length = std::env::var("OTP_LENGTH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.otp_length);
        let sms_country_code = std::env::var("SMS_COUNTRY_CODE")
            .map(|c| c.trim_start_matches('+').to_string())
            .unwrap_or(defaults.sms_country_code);
        let app_name = std::env::var("APP_NAME").unwrap_or(defaults.app_name);

        Self {
            email_token_ttl_seconds,
            email_verification_url,
            otp_length,
            otp_ttl_seconds: PHONE_CODE_TTL_SECONDS,
            sms_country_code,
            app_name,
        }
    }

    /// Set the OTP length
    pub fn with_otp_length(mut self, length: usize) -> Self {
        self.otp_length = length;
        self
    }

    /// Whether the configured OTP length is within the supported range
    pub fn has_valid_otp_length(&self) -> bool {
        (MIN_OTP_LENGTH..=MAX_OTP_LENGTH).contains(&self.otp_length)
    }
}
