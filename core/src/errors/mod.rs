//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, TokenError, VerificationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl DomainError {
    /// Stable machine-readable code exposed in error responses
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => "VALIDATION_ERROR",
            DomainError::NotFound { .. } => "NOT_FOUND",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Auth(AuthError::AdminRequired) => "FORBIDDEN",
            DomainError::Auth(_) => "UNAUTHORIZED",
            DomainError::Token(TokenError::InvalidToken) => "INVALID_TOKEN",
            DomainError::Token(TokenError::GenerationFailed) => "INTERNAL_ERROR",
            DomainError::Verification(err) => match err {
                VerificationError::UserNotFound => "NOT_FOUND",
                VerificationError::AlreadyVerified { .. } => "ALREADY_VERIFIED",
                VerificationError::ExpiredOrMissing => "EXPIRED_OR_MISSING",
                VerificationError::TokenMismatch => "TOKEN_MISMATCH",
                VerificationError::CodeMismatch => "CODE_MISMATCH",
                VerificationError::DeliveryUnavailable => "DELIVERY_UNAVAILABLE",
            },
        }
    }

    /// Whether the failure was caused by the caller rather than the system
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            DomainError::Internal { .. }
                | DomainError::Token(TokenError::GenerationFailed)
                | DomainError::Verification(VerificationError::DeliveryUnavailable)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
