use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use marathon_core::error::Success;

use crate::domain::types::RegistrationForm;
use crate::error::ParticipantsServiceError;
use crate::handlers::response::ParticipantResponse;
use crate::state::AppState;
use crate::usecase::registration::{CheckDuplicateInput, CheckDuplicateUseCase, RegisterUseCase};

/// A numeric field the web form may send either as a number or as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NumberField {
    Number(i64),
    Text(String),
}

impl NumberField {
    pub fn value(&self, message: &'static str) -> Result<i64, ParticipantsServiceError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| ParticipantsServiceError::Validation(message.into())),
        }
    }
}

// ── POST /api/register ───────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub gotra: Option<String>,
    pub birthdate: Option<String>,
    pub age: Option<NumberField>,
    pub address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_relation: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub distance: Option<String>,
    pub tshirt_size: Option<String>,
    pub medical_conditions: Option<String>,
    pub medications: Option<String>,
    pub allergies: Option<String>,
    pub accepted_declaration: bool,
}

impl RegisterRequest {
    fn into_form(self) -> Result<RegistrationForm, ParticipantsServiceError> {
        let age = self
            .age
            .as_ref()
            .map(|a| a.value("Age must be a positive number"))
            .transpose()?;
        Ok(RegistrationForm {
            first_name: self.first_name,
            middle_name: self.middle_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            gender: self.gender,
            gotra: self.gotra,
            birthdate: self.birthdate,
            age,
            address: self.address,
            emergency_contact_name: self.emergency_contact_name,
            emergency_contact_relation: self.emergency_contact_relation,
            emergency_contact_phone: self.emergency_contact_phone,
            distance: self.distance,
            tshirt_size: self.tshirt_size,
            medical_conditions: self.medical_conditions,
            medications: self.medications,
            allergies: self.allergies,
            accepted_declaration: self.accepted_declaration,
        })
    }
}

#[derive(Serialize)]
pub struct UserResponse<T> {
    pub user: T,
}

pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<
        Json<RegisterRequest>,
        ParticipantsServiceError,
    >,
) -> Result<(StatusCode, Success<UserResponse<ParticipantResponse>>), ParticipantsServiceError> {
    let usecase = RegisterUseCase {
        participants: state.participant_repo(),
        notifier: state.notifier.clone(),
    };
    let participant = usecase.execute(body.into_form()?).await?;
    Ok((
        StatusCode::CREATED,
        Success::new(UserResponse {
            user: participant.into(),
        }),
    ))
}

// ── POST /api/check-duplicate ────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckDuplicateRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Serialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

pub async fn check_duplicate(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<
        Json<CheckDuplicateRequest>,
        ParticipantsServiceError,
    >,
) -> Result<Success<ExistsResponse>, ParticipantsServiceError> {
    let usecase = CheckDuplicateUseCase {
        participants: state.participant_repo(),
    };
    let exists = usecase
        .execute(CheckDuplicateInput {
            first_name: body.first_name,
            last_name: body.last_name,
            phone_number: body.phone_number,
        })
        .await?;
    Ok(Success::new(ExistsResponse { exists }))
}
