//! CORS configuration for cross-origin requests.
//!
//! Development allows any origin; production only the configured origins.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use th_shared::config::{CorsConfig, Environment};

/// Creates a CORS middleware instance for the given environment
pub fn create_cors(environment: Environment, config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-api-key"),
        ])
        .max_age(config.max_age);

    if !environment.is_production() {
        tracing::info!("Configuring CORS for development environment");
        return cors.allow_any_origin();
    }

    config
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| {
            tracing::info!(%origin, "Adding allowed origin");
            cors.allowed_origin(origin)
        })
}
