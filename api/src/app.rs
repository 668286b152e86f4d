//! Application factory
//!
//! Builds the actix-web [`App`] with middleware, routes and application
//! state. Used by `main` and by the integration tests.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use th_core::repositories::UserRepository;
use th_core::services::notification::NotificationPort;
use th_core::services::token::TokenCodec;
use th_core::services::verification::EphemeralStore;
use th_shared::config::AppConfig;
use th_shared::types::ApiResponse;

use crate::handlers::ApiError;
use crate::middleware::{create_cors, ApiKeyAuth, JwtAuth, SecurityMiddleware};
use crate::routes::user::{
    send_email_verification_link, send_phone_verification_code, verify_email, verify_phone, AppState,
};

/// Create and configure the application with all dependencies
pub fn create_app<U, S, N>(
    app_state: web::Data<AppState<U, S, N>>,
    codec: Arc<TokenCodec>,
    config: &AppConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    S: EphemeralStore + 'static,
    N: NotificationPort + 'static,
{
    let bearer = JwtAuth::new(codec);

    App::new()
        .app_data(app_state)
        .app_data(web::QueryConfig::default().error_handler(|err, _req| {
            ApiError::validation(err.to_string()).into()
        }))
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            ApiError::validation(err.to_string()).into()
        }))
        // Last registered runs first: tracing span, then CORS, then security
        .wrap(
            SecurityMiddleware::for_environment(config.environment)
                .with_trusted_proxies(&config.server.trusted_proxies),
        )
        .wrap(create_cors(config.environment, &config.cors))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1/user")
                .wrap(ApiKeyAuth::new(&config.auth.api_key))
                .route(
                    "/send-email-verification-link",
                    web::get()
                        .to(send_email_verification_link::<U, S, N>)
                        .wrap(bearer.clone()),
                )
                .route("/verify-email", web::get().to(verify_email::<U, S, N>))
                .route(
                    "/send-phone-verification-code",
                    web::get()
                        .to(send_phone_verification_code::<U, S, N>)
                        .wrap(bearer.clone()),
                )
                .route(
                    "/verify-phone",
                    web::post().to(verify_phone::<U, S, N>).wrap(bearer),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "taskhub-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}
