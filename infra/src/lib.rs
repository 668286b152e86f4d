//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the TaskHub backend,
//! providing concrete implementations of the ports defined in `th_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL user repository using SQLx
//! - **Cache**: Redis client and the ephemeral verification store
//! - **Notification**: Redis stream publisher and a logging publisher
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use th_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and verification store
pub mod cache;

/// Notification module - Delivery queue publishers
pub mod notification;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::Internal {
            message: error.to_string(),
        }
    }
}
