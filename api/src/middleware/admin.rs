//! Admin gate, applied after [`JwtAuth`](super::JwtAuth) has attached a principal

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use th_core::errors::AuthError;

use super::auth::AuthContext;
use crate::handlers::ApiError;

/// Rejects principals without the admin flag with 403
///
/// Must be wrapped inside `JwtAuth`; a request with no principal is treated
/// as unauthenticated (401).
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireAdmin;

impl<S, B> Transform<S, ServiceRequest> for RequireAdmin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAdminMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAdminMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireAdminMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAdminMiddleware<S>
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

        Box::pin(async move {
            let principal = req.extensions().get::<AuthContext>().copied();
            let rejection = match principal {
                None => Some(AuthError::MissingBearerToken),
                Some(context) if !context.is_admin => {
                    tracing::warn!(user_id = %context.user_id, path = %req.path(), "Admin access denied");
                    Some(AuthError::AdminRequired)
                }
                Some(_) => None,
            };

            if let Some(error) = rejection {
                return Ok(req.error_response(ApiError::from(error)).map_into_right_body());
            }

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}
