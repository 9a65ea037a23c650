use crate::domain::repository::ParticipantRepository;
use crate::domain::types::Participant;
use crate::error::ParticipantsServiceError;
use crate::usecase::parse_id;

// ── GetParticipant ───────────────────────────────────────────────────────────

/// Serves both the public lookup and the admin detail view; the handlers
/// choose the projection.
pub struct GetParticipantUseCase<R: ParticipantRepository> {
    pub participants: R,
}

impl<R: ParticipantRepository> GetParticipantUseCase<R> {
    pub async fn execute(&self, raw_id: &str) -> Result<Participant, ParticipantsServiceError> {
        find(&self.participants, raw_id).await
    }
}

/// Look up a participant by a raw path id, or fail with not-found.
pub(crate) async fn find<R: ParticipantRepository>(
    participants: &R,
    raw_id: &str,
) -> Result<Participant, ParticipantsServiceError> {
    let Some(id) = parse_id(raw_id) else {
        return Err(ParticipantsServiceError::ParticipantNotFound);
    };
    participants
        .find_by_id(&id)
        .await?
        .ok_or(ParticipantsServiceError::ParticipantNotFound)
}

// ── ListPasses ───────────────────────────────────────────────────────────────

pub struct ListPassesUseCase<R: ParticipantRepository> {
    pub participants: R,
}

impl<R: ParticipantRepository> ListPassesUseCase<R> {
    /// Every registration made with the verified phone number.
    pub async fn execute(&self, phone_number: &str) -> Result<Vec<Participant>, ParticipantsServiceError> {
        self.participants.list_by_phone(phone_number).await
    }
}

// ── RelatedParticipants ──────────────────────────────────────────────────────

pub struct RelatedParticipantsUseCase<R: ParticipantRepository> {
    pub participants: R,
}

impl<R: ParticipantRepository> RelatedParticipantsUseCase<R> {
    /// Other registrations sharing this participant's phone number.
    pub async fn execute(&self, raw_id: &str) -> Result<Vec<Participant>, ParticipantsServiceError> {
        let participant = find(&self.participants, raw_id).await?;
        let related = self
            .participants
            .list_by_phone(&participant.phone_number)
            .await?
            .into_iter()
            .filter(|p| p.id != participant.id)
            .collect();
        Ok(related)
    }
}

// ── CheckParticipant ─────────────────────────────────────────────────────────

pub struct CheckParticipantUseCase<R: ParticipantRepository> {
    pub participants: R,
}

impl<R: ParticipantRepository> CheckParticipantUseCase<R> {
    pub async fn execute(&self, raw_id: &str) -> Result<bool, ParticipantsServiceError> {
        match parse_id(raw_id) {
            Some(id) => self.participants.exists(&id).await,
            None => Ok(false),
        }
    }
}
