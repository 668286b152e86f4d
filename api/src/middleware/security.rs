//! Security middleware for HTTPS enforcement and response hardening headers.
//!
//! In production every request must arrive over HTTPS, either on a TLS
//! listener or through a trusted proxy setting `X-Forwarded-Proto`. Every
//! response carries HSTS, no-sniff, frame and CSP headers.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderValue},
    Error, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    net::IpAddr,
    rc::Rc,
    task::{Context, Poll},
};
use th_shared::config::Environment;
use th_shared::types::ApiResponse;

/// Security middleware factory
#[derive(Debug, Clone)]
pub struct SecurityMiddleware {
    /// Whether to reject plain HTTP requests
    enforce_https: bool,
    /// Whether to add security headers
    add_security_headers: bool,
    /// Peers whose `X-Forwarded-Proto` header is trusted
    trusted_proxies: Vec<IpAddr>,
}

impl SecurityMiddleware {
    /// Full enforcement in production, pass-through otherwise
    pub fn for_environment(environment: Environment) -> Self {
        let production = environment.is_production();
        tracing::info!(
            enforce_https = production,
            add_security_headers = production,
            "Security middleware configured"
        );

        Self {
            enforce_https: production,
            add_security_headers: production,
            trusted_proxies: vec![],
        }
    }

    /// Headers only, no HTTPS enforcement
    pub fn headers_only() -> Self {
        Self {
            enforce_https: false,
            add_security_headers: true,
            trusted_proxies: vec![],
        }
    }

    /// Trust `X-Forwarded-Proto` from these proxy IPs
    ///
    /// Entries that are not IP addresses are skipped with a warning.
    pub fn with_trusted_proxies<I, T>(mut self, proxies: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for proxy in proxies {
            let proxy = proxy.as_ref();
            match proxy.trim().parse::<IpAddr>() {
                Ok(ip) => self.trusted_proxies.push(ip),
                Err(_) => tracing::warn!(proxy = %proxy, "Ignoring trusted proxy that is not an IP address"),
            }
        }
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityMiddlewareService {
            service: Rc::new(service),
            enforce_https: self.enforce_https,
            add_security_headers: self.add_security_headers,
            trusted_proxies: Rc::new(self.trusted_proxies.clone()),
        }))
    }
}

/// Security middleware service implementation
pub struct SecurityMiddlewareService<S> {
    service: Rc<S>,
    enforce_https: bool,
    add_security_headers: bool,
    trusted_proxies: Rc<Vec<IpAddr>>,
}

impl<S, B> Service<ServiceRequest> for SecurityMiddlewareService<S>
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
        let enforce_https = self.enforce_https;
        let add_security_headers = self.add_security_headers;
        let trusted_proxies = Rc::clone(&self.trusted_proxies);

        Box::pin(async move {
            if enforce_https && !is_secure_request(&req, &trusted_proxies) {
                tracing::warn!(method = %req.method(), path = %req.path(), "Insecure request blocked");
                let response = HttpResponse::Forbidden()
                    .json(ApiResponse::<()>::error("HTTPS_REQUIRED", "HTTPS required"));
                return Ok(req.into_response(response).map_into_right_body());
            }

            let mut response = service.call(req).await?;

            if add_security_headers {
                add_security_response_headers(&mut response);
            }

            Ok(response.map_into_left_body())
        })
    }
}

/// Whether the request reached us over TLS, directly or via a trusted proxy
///
/// `ConnectionInfo::scheme` is not used here: it believes forwarding headers
/// from any peer.
fn is_secure_request(req: &ServiceRequest, trusted_proxies: &[IpAddr]) -> bool {
    if req.app_config().secure() || req.uri().scheme_str() == Some("https") {
        return true;
    }

    let from_trusted_proxy = req
        .peer_addr()
        .map(|addr| is_trusted_proxy(addr.ip(), trusted_proxies))
        .unwrap_or(false);

    from_trusted_proxy
        && req
            .headers()
            .get("x-forwarded-proto")
            .and_then(|value| value.to_str().ok())
            .map(|proto| proto.trim().eq_ignore_ascii_case("https"))
            .unwrap_or(false)
}

fn is_trusted_proxy(peer: IpAddr, trusted_proxies: &[IpAddr]) -> bool {
    trusted_proxies.contains(&peer)
}

fn add_security_response_headers<B>(response: &mut ServiceResponse<B>) {
    let headers = response.headers_mut();

    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none';"),
    );
}
