//! Signed token claims.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default lifetime of a session token in seconds (24 hours)
pub const SESSION_TOKEN_EXPIRY_SECONDS: u64 = 86400;

/// Default lifetime of an email verification token in seconds (24 hours)
pub const EMAIL_TOKEN_EXPIRY_SECONDS: u64 = 86400;

/// What a signed token may be used for
///
/// A token signed for one purpose never verifies for another, so an email
/// link cannot be replayed as a bearer token and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    Session,
    EmailVerification,
}

/// JWT claims envelope shared by every token the codec issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims<T> {
    /// Subject (user ID)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Purpose the token was signed for
    pub purpose: TokenPurpose,

    /// Purpose-specific claims
    #[serde(rename = "claims")]
    pub data: T,
}

impl<T> Claims<T> {
    /// Subject parsed as a user ID
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

/// Claims carried by a bearer session token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

/// Claims carried by an email verification token
///
/// The subject is the whole payload; the struct exists so the envelope stays
/// uniform across purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmailVerificationClaims {}
