//! Bearer token authentication middleware for protecting API endpoints.
//!
//! The middleware extracts the token from the `Authorization: Bearer` header,
//! verifies it with the shared [`TokenCodec`] and inserts an [`AuthContext`]
//! into the request extensions for handlers to extract.

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use th_core::errors::{AuthError, DomainError};
use th_core::services::token::TokenCodec;
use uuid::Uuid;

use crate::handlers::ApiError;

/// Authenticated principal attached to the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// User ID from the token subject
    pub user_id: Uuid,
    /// Admin flag from the token claims
    pub is_admin: bool,
}

/// Bearer token authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    codec: Arc<TokenCodec>,
}

impl JwtAuth {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            codec: Arc::clone(&self.codec),
        }))
    }
}

/// Bearer token authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    codec: Arc<TokenCodec>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let codec = Arc::clone(&self.codec);

        Box::pin(async move {
            let auth_context = match authenticate(&req, &codec) {
                Ok(context) => context,
                Err(e) => {
                    tracing::warn!(
                        method = %req.method(),
                        path = %req.path(),
                        error = %e,
                        "Rejected unauthenticated request"
                    );
                    return Ok(req.error_response(ApiError::from(e)).map_into_right_body());
                }
            };

            req.extensions_mut().insert(auth_context);

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

fn authenticate(req: &ServiceRequest, codec: &TokenCodec) -> Result<AuthContext, AuthError> {
    let token = extract_bearer_token(req).ok_or(AuthError::MissingBearerToken)?;

    let (user_id, claims) = codec.verify_session_token(&token).map_err(|e: DomainError| {
        tracing::debug!(error = %e, "Bearer token verification failed");
        AuthError::InvalidBearerToken
    })?;

    Ok(AuthContext {
        user_id,
        is_admin: claims.is_admin,
    })
}

/// Extracts the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .copied()
            .ok_or_else(|| ApiError::from(AuthError::MissingBearerToken));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extract_bearer_token() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        let req_empty = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }
}
