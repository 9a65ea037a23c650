use axum::extract::{Path, State};
use serde::Serialize;

use marathon_auth_types::bearer::ParticipantIdentity;
use marathon_core::error::Success;

use crate::error::ParticipantsServiceError;
use crate::handlers::registration::UserResponse;
use crate::handlers::response::{ParticipantResponse, PublicParticipantResponse};
use crate::state::AppState;
use crate::usecase::lookup::{GetParticipantUseCase, ListPassesUseCase};

// ── GET /api/public/user/{id} ────────────────────────────────────────────────

pub async fn public_participant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Success<UserResponse<PublicParticipantResponse>>, ParticipantsServiceError> {
    let usecase = GetParticipantUseCase {
        participants: state.participant_repo(),
    };
    let participant = usecase.execute(&id).await?;
    Ok(Success::new(UserResponse {
        user: participant.into(),
    }))
}

// ── POST /api/user/passes ────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PassesResponse {
    pub passes: Vec<ParticipantResponse>,
}

pub async fn my_passes(
    identity: ParticipantIdentity,
    State(state): State<AppState>,
) -> Result<Success<PassesResponse>, ParticipantsServiceError> {
    let usecase = ListPassesUseCase {
        participants: state.participant_repo(),
    };
    let passes = usecase.execute(&identity.phone_number).await?;
    Ok(Success::new(PassesResponse {
        passes: passes.into_iter().map(Into::into).collect(),
    }))
}
