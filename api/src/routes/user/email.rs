use actix_web::{web, HttpResponse};
use th_core::repositories::UserRepository;
use th_core::services::notification::NotificationPort;
use th_core::services::verification::EphemeralStore;
use th_shared::types::ApiResponse;

use super::AppState;
use crate::dto::user::{VerifiedEmailResponse, VerifyEmailQuery};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/user/send-email-verification-link
///
/// Sends a fresh verification link to the authenticated user's email
/// address. Any earlier link stops working.
pub async fn send_email_verification_link<U, S, N>(
    auth: AuthContext,
    state: web::Data<AppState<U, S, N>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: EphemeralStore + 'static,
    N: NotificationPort + 'static,
{
    state
        .email_verification
        .send_verification_link(auth.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::acknowledged("Email verification Link sent")))
}

/// Handler for GET /api/v1/user/verify-email?token=...
///
/// # Response
///
/// ```json
/// {
///     "success": true,
///     "message": "Email verified successfully",
///     "data": { "user": { "id": "...", "userName": "ada", "email": "ada@example.com" } }
/// }
/// ```
pub async fn verify_email<U, S, N>(
    state: web::Data<AppState<U, S, N>>,
    query: web::Query<VerifyEmailQuery>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: EphemeralStore + 'static,
    N: NotificationPort + 'static,
{
    let user = state.email_verification.verify_email(&query.token).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Email verified successfully",
        VerifiedEmailResponse { user },
    )))
}
