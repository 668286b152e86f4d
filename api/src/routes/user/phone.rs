use actix_web::{web, HttpResponse};
use th_core::repositories::UserRepository;
use th_core::services::notification::NotificationPort;
use th_core::services::verification::EphemeralStore;
use th_shared::types::ApiResponse;
use validator::Validate;

use super::AppState;
use crate::dto::user::{PhoneCodeResponse, VerifyPhoneRequest};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;

const CODE_SENT: &str = "Phone Number verification Code sent";

/// Handler for GET /api/v1/user/send-phone-verification-code
///
/// Outside production the code is echoed back as `data.otp`.
pub async fn send_phone_verification_code<U, S, N>(
    auth: AuthContext,
    state: web::Data<AppState<U, S, N>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: EphemeralStore + 'static,
    N: NotificationPort + 'static,
{
    let otp = state
        .phone_verification
        .send_verification_code(auth.user_id)
        .await?;

    let response = match otp {
        Some(otp) => HttpResponse::Ok().json(ApiResponse::success(CODE_SENT, PhoneCodeResponse { otp })),
        None => HttpResponse::Ok().json(ApiResponse::<()>::acknowledged(CODE_SENT)),
    };

    Ok(response)
}

/// Handler for POST /api/v1/user/verify-phone
///
/// Body: `{ "token": "<4-6 digits>" }`
pub async fn verify_phone<U, S, N>(
    auth: AuthContext,
    state: web::Data<AppState<U, S, N>>,
    request: web::Json<VerifyPhoneRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: EphemeralStore + 'static,
    N: NotificationPort + 'static,
{
    request.validate().map_err(|e| {
        tracing::warn!(user_id = %auth.user_id, "Rejected malformed phone verification code");
        ApiError::from(e)
    })?;

    state
        .phone_verification
        .verify_phone(auth.user_id, &request.token)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::acknowledged("Phone verified Successfully")))
}
