//! Static API key gate
//!
//! Every `/api/v1/user` request must carry the configured key in the
//! `x-api-key` header. The comparison is constant-time.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use constant_time_eq::constant_time_eq;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use th_core::errors::AuthError;
use th_shared::config::ApiKeyConfig;

use crate::handlers::ApiError;

/// API key middleware factory
#[derive(Clone)]
pub struct ApiKeyAuth {
    header: Arc<str>,
    key: Arc<str>,
}

impl ApiKeyAuth {
    pub fn new(config: &ApiKeyConfig) -> Self {
        Self {
            header: Arc::from(config.header.as_str()),
            key: Arc::from(config.key.as_str()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyMiddleware {
            service: Rc::new(service),
            header: Arc::clone(&self.header),
            key: Arc::clone(&self.key),
        }))
    }
}

pub struct ApiKeyMiddleware<S> {
    service: Rc<S>,
    header: Arc<str>,
    key: Arc<str>,
}

impl<S, B> Service<ServiceRequest> for ApiKeyMiddleware<S>
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
        let accepted = req
            .headers()
            .get(self.header.as_ref())
            .map(|value| constant_time_eq(value.as_bytes(), self.key.as_bytes()))
            .unwrap_or(false);

        Box::pin(async move {
            if !accepted {
                tracing::warn!(method = %req.method(), path = %req.path(), "Missing or invalid API key");
                return Ok(req
                    .error_response(ApiError::from(AuthError::InvalidApiKey))
                    .map_into_right_body());
            }

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}
