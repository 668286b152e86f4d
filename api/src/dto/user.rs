use serde::{Deserialize, Serialize};
use th_core::services::verification::VerifiedEmail;
use validator::{Validate, ValidationError};

/// Query string of the link sent by email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailQuery {
    /// Transport-encoded verification token
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyPhoneRequest {
    /// Numeric code received by SMS
    #[validate(length(min = 4, max = 6), custom = "validate_digits")]
    pub token: String,
}

fn validate_digits(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("digits"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifiedEmailResponse {
    pub user: VerifiedEmail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneCodeResponse {
    pub otp: String,
}
