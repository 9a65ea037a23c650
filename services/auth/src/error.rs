use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use marathon_core::error::failure;

pub const INVALID_BODY: &str = "Invalid request body";

/// Auth service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    /// Missing or blank required input. Carries the client-facing message.
    #[error("{0}")]
    MissingField(&'static str),
    /// Body that is not JSON or does not fit the request shape.
    #[error("{0}")]
    Validation(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// Never issued, already consumed or replaced: indistinguishable on purpose.
    #[error("OTP not found or expired")]
    OtpNotFound,
    #[error("Invalid OTP")]
    InvalidOtp,
    #[error("OTP expired")]
    OtpExpired,
    /// The code is stored but the provider refused to deliver it.
    #[error("Failed to send OTP via WhatsApp")]
    DeliveryFailed(String),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AuthServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::Validation(_) => "VALIDATION",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::OtpNotFound => "OTP_NOT_FOUND",
            Self::InvalidOtp => "INVALID_OTP",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::DeliveryFailed(_) => "DELIVERY_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<JsonRejection> for AuthServiceError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(detail = %rejection.body_text(), "request body rejected");
        Self::Validation(INVALID_BODY.to_owned())
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingField(_)
            | Self::Validation(_)
            | Self::OtpNotFound
            | Self::InvalidOtp
            | Self::OtpExpired => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::DeliveryFailed(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // TraceLayer records method/uri/status for every request; only the
        // server-side failures carry detail worth logging here.
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = format!("{e:#}"), kind = "INTERNAL", "internal error");
            }
            Self::DeliveryFailed(detail) => {
                tracing::warn!(detail = %detail, kind = "DELIVERY_FAILED", "otp delivery failed");
            }
            _ => {}
        }
        failure(status, self.kind(), &self.to_string())
    }
}
