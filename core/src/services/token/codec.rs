//! HS256 token codec implementation

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::domain::entities::token::{
    Claims, EmailVerificationClaims, SessionClaims, TokenPurpose,
};
use crate::errors::{DomainError, TokenError};

use super::config::TokenCodecConfig;

/// Signs and verifies purpose-scoped tokens with a shared secret
pub struct TokenCodec {
    config: TokenCodecConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a new codec
    pub fn new(config: TokenCodecConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    pub fn config(&self) -> &TokenCodecConfig {
        &self.config
    }

    /// Signs `data` for `subject`, valid for `ttl_seconds` from now
    ///
    /// No random token ID is embedded: identical inputs signed within the same
    /// second produce identical tokens.
    pub fn sign<T: Serialize>(
        &self,
        subject: &str,
        purpose: TokenPurpose,
        data: T,
        ttl_seconds: u64,
    ) -> Result<String, DomainError> {
        self.sign_at(Utc::now().timestamp(), subject, purpose, data, ttl_seconds)
    }

    pub(crate) fn sign_at<T: Serialize>(
        &self,
        issued_at: i64,
        subject: &str,
        purpose: TokenPurpose,
        data: T,
        ttl_seconds: u64,
    ) -> Result<String, DomainError> {
        let ttl = i64::try_from(ttl_seconds)
            .map_err(|_| DomainError::Token(TokenError::GenerationFailed))?;
        let claims = Claims {
            sub: subject.to_string(),
            iss: self.config.issuer.clone(),
            iat: issued_at,
            exp: issued_at.saturating_add(ttl),
            purpose,
            data,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, ?purpose, "Failed to sign token");
            DomainError::Token(TokenError::GenerationFailed)
        })
    }

    /// Verifies a token signed for `purpose` and returns its claims
    ///
    /// Bad signatures, malformed tokens, a different purpose and expired
    /// tokens (`now >= exp`) all yield [`TokenError::InvalidToken`].
    pub fn verify<T: DeserializeOwned>(
        &self,
        token: &str,
        purpose: TokenPurpose,
    ) -> Result<Claims<T>, DomainError> {
        let token_data = decode::<Claims<T>>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, ?purpose, "Token verification failed");
                DomainError::Token(TokenError::InvalidToken)
            })?;
        let claims = token_data.claims;

        // jsonwebtoken accepts `exp == now`; tokens are dead from `exp` on
        if claims.purpose != purpose || Utc::now().timestamp() >= claims.exp {
            return Err(DomainError::Token(TokenError::InvalidToken));
        }

        Ok(claims)
    }

    /// Issues a bearer session token for a user
    pub fn issue_session_token(&self, user_id: Uuid, is_admin: bool) -> Result<String, DomainError> {
        self.sign(
            &user_id.to_string(),
            TokenPurpose::Session,
            SessionClaims { is_admin },
            self.config.session_ttl_seconds,
        )
    }

    /// Verifies a bearer session token, returning the user ID and session claims
    pub fn verify_session_token(&self, token: &str) -> Result<(Uuid, SessionClaims), DomainError> {
        let claims = self.verify::<SessionClaims>(token, TokenPurpose::Session)?;
        let user_id = claims
            .user_id()
            .ok_or(DomainError::Token(TokenError::InvalidToken))?;
        Ok((user_id, claims.data))
    }

    /// Issues a transport-encoded email verification token
    ///
    /// The returned string is what goes into the link and into the pending
    /// verification record.
    pub fn issue_email_token(&self, user_id: Uuid) -> Result<String, DomainError> {
        let token = self.sign(
            &user_id.to_string(),
            TokenPurpose::EmailVerification,
            EmailVerificationClaims::default(),
            self.config.email_ttl_seconds,
        )?;
        Ok(encode_transport(&token))
    }

    /// Decodes and verifies a transport-encoded email verification token
    pub fn verify_email_token(&self, encoded: &str) -> Result<Uuid, DomainError> {
        let token = decode_transport(encoded)?;
        let claims = self.verify::<EmailVerificationClaims>(&token, TokenPurpose::EmailVerification)?;
        claims
            .user_id()
            .ok_or(DomainError::Token(TokenError::InvalidToken))
    }
}

/// Wraps a signed token in URL-safe base64 without padding
pub fn encode_transport(token: &str) -> String {
    URL_SAFE_NO_PAD.encode(token.as_bytes())
}

/// Reverses [`encode_transport`]; any decoding or UTF-8 failure is an invalid token
pub fn decode_transport(encoded: &str) -> Result<String, DomainError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|_| DomainError::Token(TokenError::InvalidToken))?;
    String::from_utf8(bytes).map_err(|_| DomainError::Token(TokenError::InvalidToken))
}
