//! Mapping of domain errors onto HTTP responses
//!
//! Every failure leaves the API as `{ "success": false, "error": <CODE>,
//! "message": ... }` with a status derived from the error kind.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use th_core::errors::{AuthError, DomainError, TokenError, VerificationError};
use th_shared::types::ApiResponse;

/// Error type returned by handlers and middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError(pub DomainError);

impl ApiError {
    /// Malformed request input
    pub fn validation(message: impl Into<String>) -> Self {
        Self(DomainError::Validation {
            message: message.into(),
        })
    }

    pub fn domain_error(&self) -> &DomainError {
        &self.0
    }

    /// Message safe to show to clients; system failures are not detailed
    fn public_message(&self) -> String {
        match &self.0 {
            DomainError::Internal { .. } | DomainError::Token(TokenError::GenerationFailed) => {
                "An internal error occurred".to_string()
            }
            DomainError::Validation { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ApiError {}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self(error)
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        Self(error.into())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
        fields.sort_unstable();
        Self::validation(format!("Invalid request data: {}", fields.join(", ")))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Auth(AuthError::AdminRequired) => StatusCode::FORBIDDEN,
            DomainError::Auth(_) => StatusCode::UNAUTHORIZED,
            DomainError::Token(TokenError::InvalidToken) => StatusCode::BAD_REQUEST,
            DomainError::Token(TokenError::GenerationFailed) => StatusCode::INTERNAL_SERVER_ERROR,
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            DomainError::Verification(err) => match err {
                VerificationError::UserNotFound => StatusCode::NOT_FOUND,
                VerificationError::AlreadyVerified { .. } => StatusCode::CONFLICT,
                VerificationError::ExpiredOrMissing
                | VerificationError::TokenMismatch
                | VerificationError::CodeMismatch => StatusCode::BAD_REQUEST,
                VerificationError::DeliveryUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ApiResponse::<()>::error(self.0.error_code(), self.public_message()))
    }
}
