//! Shared utilities and common types for the TaskHub server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - API response envelope
//! - Utility functions (phone formatting and masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    ApiKeyConfig, AppConfig, AuthConfig, CacheConfig, ConfigError, CorsConfig, DatabaseConfig,
    Environment, JwtConfig, LoggingConfig, NotificationConfig, ServerConfig, VerificationConfig,
};
pub use types::ApiResponse;
pub use utils::phone;
