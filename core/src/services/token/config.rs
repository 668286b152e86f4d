//! Configuration for the token codec

use th_shared::{JwtConfig, VerificationConfig};

use crate::domain::entities::token::{EMAIL_TOKEN_EXPIRY_SECONDS, SESSION_TOKEN_EXPIRY_SECONDS};

/// Configuration for the token codec
#[derive(Debug, Clone)]
pub struct TokenCodecConfig {
    /// HS256 signing secret
    pub secret: String,
    /// Value of the `iss` claim, checked on verification
    pub issuer: String,
    /// Session token lifetime in seconds
    pub session_ttl_seconds: u64,
    /// Email verification token lifetime in seconds
    pub email_ttl_seconds: u64,
}

impl TokenCodecConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: "taskhub".to_string(),
            session_ttl_seconds: SESSION_TOKEN_EXPIRY_SECONDS,
            email_ttl_seconds: EMAIL_TOKEN_EXPIRY_SECONDS,
        }
    }

    /// Build from the application settings
    pub fn from_settings(jwt: &JwtConfig, verification: &VerificationConfig) -> Self {
        Self {
            secret: jwt.secret.clone(),
            issuer: jwt.issuer.clone(),
            session_ttl_seconds: u64::try_from(jwt.access_token_expiry)
                .unwrap_or(SESSION_TOKEN_EXPIRY_SECONDS),
            email_ttl_seconds: verification.email_token_ttl_seconds,
        }
    }

    pub fn with_email_ttl(mut self, seconds: u64) -> Self {
        self.email_ttl_seconds = seconds;
        self
    }
}
