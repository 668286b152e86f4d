//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Session token signing and API key gate
//! - `cache` - Ephemeral verification store (Redis)
//! - `database` - User record store connection
//! - `environment` - Deployment mode and logging
//! - `notification` - Delivery queue publisher
//! - `server` - HTTP server and CORS
//! - `verification` - Email link and phone OTP policy

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod notification;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{ApiKeyConfig, AuthConfig, JwtConfig};
pub use cache::{CacheConfig, StoreProvider};
pub use database::{DatabaseConfig, DatabaseProvider};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use notification::{NotificationConfig, NotificationProvider};
pub use server::{CorsConfig, ServerConfig};
pub use verification::VerificationConfig;

/// Configuration errors detected at startup
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("OTP length must be between {min} and {max}, got {actual}")]
    InvalidOtpLength { min: usize, max: usize, actual: usize },

    #[error("JWT_SECRET must be set in production")]
    DefaultSecretInProduction,

    #[error("API_KEY must be set in production")]
    DefaultApiKeyInProduction,
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Verification policy
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Notification queue
    #[serde(default)]
    pub notification: NotificationConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env();
        let verification = VerificationConfig::from_env(&server.public_url);

        Self {
            environment,
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            verification,
            notification: NotificationConfig::from_env(),
            cors: CorsConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
            server,
        }
    }

    /// Reject configurations the workflows cannot run safely with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.verification.has_valid_otp_length() {
            return Err(ConfigError::InvalidOtpLength {
                min: verification::MIN_OTP_LENGTH,
                max: verification::MAX_OTP_LENGTH,
                actual: self.verification.otp_length,
            });
        }

        if self.auth.jwt.is_using_default_secret() {
            if self.environment.is_production() {
                return Err(ConfigError::DefaultSecretInProduction);
            }
            tracing::warn!("Using the default JWT secret; set JWT_SECRET outside development");
        }

        if self.environment.is_production() && self.auth.api_key.key == ApiKeyConfig::default().key {
            return Err(ConfigError::DefaultApiKeyInProduction);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(AppConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_out_of_range_otp_length() {
        let mut config = AppConfig::default();
        config.verification.otp_length = 8;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidOtpLength { min: 4, max: 6, actual: 8 })
        );
    }

    #[test]
    fn test_rejects_default_secret_in_production() {
        let mut config = AppConfig::default();
        config.environment = Environment::Production;
        assert_eq!(config.validate(), Err(ConfigError::DefaultSecretInProduction));

        config.auth.jwt = JwtConfig::new("a-real-secret");
        assert_eq!(config.validate(), Err(ConfigError::DefaultApiKeyInProduction));

        config.auth.api_key.key = "a-real-key".to_string();
        assert_eq!(config.validate(), Ok(()));
    }
}
