//! Configuration for the verification workflows

use th_shared::config::verification::{MAX_OTP_LENGTH, PHONE_CODE_TTL_SECONDS};
use th_shared::{Environment, VerificationConfig};

/// Configuration for the verification workflows
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Confirmation endpoint the email link points at
    pub email_verification_url: String,
    /// Number of digits in a phone OTP
    pub otp_length: usize,
    /// Lifetime of a pending phone code in seconds
    pub otp_ttl_seconds: u64,
    /// Country code applied to local phone numbers
    pub sms_country_code: String,
    /// Product name used in the SMS text
    pub app_name: String,
    /// Whether a freshly issued OTP is returned to the caller (never in production)
    pub expose_otp: bool,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            email_verification_url: "http://localhost:8080/api/v1/user/verify-email".to_string(),
            otp_length: MAX_OTP_LENGTH,
            otp_ttl_seconds: PHONE_CODE_TTL_SECONDS,
            sms_country_code: "234".to_string(),
            app_name: "TaskHub".to_string(),
            expose_otp: true,
        }
    }
}

impl VerificationServiceConfig {
    /// Build from the application settings
    pub fn from_settings(settings: &VerificationConfig, environment: Environment) -> Self {
        Self {
            email_verification_url: settings.email_verification_url.clone(),
            otp_length: settings.otp_length,
            otp_ttl_seconds: settings.otp_ttl_seconds,
            sms_country_code: settings.sms_country_code.clone(),
            app_name: settings.app_name.clone(),
            expose_otp: !environment.is_production(),
        }
    }
}
