//! Integration tests for the bearer token and admin gates

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App, HttpResponse};
use serde_json::Value;
use th_api::middleware::{AuthContext, JwtAuth, RequireAdmin};
use th_core::services::token::{TokenCodec, TokenCodecConfig};
use th_core::TokenPurpose;
use th_core::EmailVerificationClaims;
use uuid::Uuid;

fn codec() -> Arc<TokenCodec> {
    Arc::new(TokenCodec::new(TokenCodecConfig::new("middleware-test-secret")))
}

async fn whoami(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "user_id": auth.user_id.to_string(),
        "is_admin": auth.is_admin,
    }))
}

#[actix_web::test]
async fn test_middleware_requires_auth_header() {
    let app = test::init_service(
        App::new().route("/protected", web::get().to(whoami).wrap(JwtAuth::new(codec()))),
    )
    .await;

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert_eq!(body["message"], "Not authorized, no token");
}

#[actix_web::test]
async fn test_middleware_rejects_invalid_token() {
    let app = test::init_service(
        App::new().route("/protected", web::get().to(whoami).wrap(JwtAuth::new(codec()))),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", "Bearer invalid-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Not authorized, token failed");
}

#[actix_web::test]
async fn test_middleware_rejects_other_purposes_and_secrets() {
    let codec = codec();
    let app = test::init_service(
        App::new().route("/protected", web::get().to(whoami).wrap(JwtAuth::new(Arc::clone(&codec)))),
    )
    .await;
    let user_id = Uuid::new_v4().to_string();

    // An email verification token is not a session token
    let email_token = codec
        .sign(&user_id, TokenPurpose::EmailVerification, EmailVerificationClaims::default(), 60)
        .unwrap();
    // Signed with another secret
    let foreign = TokenCodec::new(TokenCodecConfig::new("another-secret"))
        .issue_session_token(Uuid::new_v4(), true)
        .unwrap();

    for token in [email_token, foreign] {
        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}

#[actix_web::test]
async fn test_valid_token_attaches_principal() {
    let codec = codec();
    let user_id = Uuid::new_v4();
    let token = codec.issue_session_token(user_id, false).unwrap();

    let app = test::init_service(
        App::new().route("/protected", web::get().to(whoami).wrap(JwtAuth::new(codec))),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["user_id"], user_id.to_string());
    assert_eq!(body["is_admin"], false);
}

#[actix_web::test]
async fn test_auth_context_extractor_without_middleware() {
    let app = test::init_service(App::new().route("/protected", web::get().to(whoami))).await;

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_require_admin() {
    let codec = codec();
    let app = test::init_service(
        App::new().route(
            "/admin",
            web::get()
                .to(whoami)
                .wrap(RequireAdmin)
                .wrap(JwtAuth::new(Arc::clone(&codec))),
        ),
    )
    .await;

    let member = codec.issue_session_token(Uuid::new_v4(), false).unwrap();
    let req = test::TestRequest::get()
        .uri("/admin")
        .insert_header(("Authorization", format!("Bearer {}", member)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "FORBIDDEN");
    assert_eq!(body["message"], "Not authorized as an admin");

    let admin = codec.issue_session_token(Uuid::new_v4(), true).unwrap();
    let req = test::TestRequest::get()
        .uri("/admin")
        .insert_header(("Authorization", format!("Bearer {}", admin)))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // No token at all never reaches the admin check
    let req = test::TestRequest::get().uri("/admin").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}
