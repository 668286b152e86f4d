//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

/// Secret used when `JWT_SECRET` is not set; refused in production
pub const DEFAULT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Session (access) token expiry time in seconds
    pub access_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            access_token_expiry: 86400, // 24 hours
            issuer: String::from("taskhub"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Static API key expected in the `x-api-key` header
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiKeyConfig {
    /// Header name carrying the key
    pub header: String,

    /// Expected key value
    pub key: String,
}

impl Default for ApiKeyConfig {
    fn default() -> Self {
        Self {
            header: String::from("x-api-key"),
            key: String::from("development-api-key"),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// API key gate configuration
    #[serde(default)]
    pub api_key: ApiKeyConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or(defaults.secret);
        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.access_token_expiry);
        let issuer = std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer);

        let api_key = std::env::var("API_KEY").unwrap_or_else(|_| ApiKeyConfig::default().key);

        Self {
            jwt: JwtConfig {
                secret: jwt_secret,
                access_token_expiry,
                issuer,
            },
            api_key: ApiKeyConfig {
                key: api_key,
                ..Default::default()
            },
        }
    }
}
