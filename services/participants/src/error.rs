use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use marathon_core::error::failure;

pub const INVALID_BODY: &str = "Invalid request body";

/// Participants service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ParticipantsServiceError {
    /// Missing or blank required input. Carries the client-facing message.
    #[error("{0}")]
    MissingField(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error("User not found")]
    ParticipantNotFound,
    #[error("A participant with this name and phone number is already registered")]
    DuplicateParticipant,
    #[error("Failed to send ticket confirmation")]
    DeliveryFailed(String),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ParticipantsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::Validation(_) => "VALIDATION",
            Self::ParticipantNotFound => "PARTICIPANT_NOT_FOUND",
            Self::DuplicateParticipant => "DUPLICATE_PARTICIPANT",
            Self::DeliveryFailed(_) => "DELIVERY_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<JsonRejection> for ParticipantsServiceError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(detail = %rejection.body_text(), "request body rejected");
        Self::Validation(INVALID_BODY.to_owned())
    }
}

impl IntoResponse for ParticipantsServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingField(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::ParticipantNotFound => StatusCode::NOT_FOUND,
            Self::DuplicateParticipant => StatusCode::CONFLICT,
            Self::DeliveryFailed(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = format!("{e:#}"), kind = "INTERNAL", "internal error");
            }
            Self::DeliveryFailed(detail) => {
                tracing::warn!(detail = %detail, kind = "DELIVERY_FAILED", "ticket delivery failed");
            }
            _ => {}
        }
        failure(status, self.kind(), &self.to_string())
    }
}
