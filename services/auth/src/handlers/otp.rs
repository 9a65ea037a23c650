use axum::{Json, extract::State};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use marathon_core::error::Success;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::otp::{IssueOtpInput, IssueOtpUseCase, VerifyOtpInput, VerifyOtpUseCase};

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// ── POST /api/auth/send-register-otp ─────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    #[serde(default)]
    pub phone_number: String,
}

pub async fn send_register_otp(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<SendOtpRequest>, AuthServiceError>,
) -> Result<Success<MessageResponse>, AuthServiceError> {
    let usecase = IssueOtpUseCase {
        otps: state.otp_repo(),
        notifier: state.notifier.clone(),
    };
    usecase
        .execute(IssueOtpInput {
            phone_number: body.phone_number,
        })
        .await?;
    Ok(Success::new(MessageResponse {
        message: "OTP sent successfully",
    }))
}

// ── POST /api/auth/verify-otp ────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub otp: String,
}

#[derive(Serialize)]
pub struct VerifyOtpResponse {
    pub message: &'static str,
    pub token: String,
}

pub async fn verify_otp(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<VerifyOtpRequest>, AuthServiceError>,
) -> Result<Success<VerifyOtpResponse>, AuthServiceError> {
    let usecase = VerifyOtpUseCase {
        otps: state.otp_repo(),
        jwt_secret: state.jwt_secret.clone(),
        session_ttl_secs: state.session_token_ttl_secs,
    };
    let out = usecase
        .execute(VerifyOtpInput {
            phone_number: body.phone_number,
            code: body.otp,
        })
        .await?;
    Ok(Success::new(VerifyOtpResponse {
        message: "OTP verified successfully",
        token: out.token,
    }))
}
