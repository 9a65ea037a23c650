use chrono::Utc;

use marathon_domain::id::ParticipantId;
use marathon_notify::{NotificationSender, Template};

use crate::domain::repository::ParticipantRepository;
use crate::domain::types::{MAX_ID_ATTEMPTS, NewParticipant, Participant, RegistrationForm};
use crate::error::ParticipantsServiceError;

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterUseCase<R, N>
where
    R: ParticipantRepository,
    N: NotificationSender,
{
    pub participants: R,
    pub notifier: N,
}

impl<R, N> RegisterUseCase<R, N>
where
    R: ParticipantRepository,
    N: NotificationSender,
{
    /// Validate, reject duplicates, store under a fresh id, then send the
    /// registration message. A failed send is logged; the registration stands.
    pub async fn execute(&self, form: RegistrationForm) -> Result<Participant, ParticipantsServiceError> {
        let registration = form.validate()?;

        if self
            .participants
            .find_duplicate(
                &registration.first_name,
                &registration.last_name,
                &registration.phone_number,
            )
            .await?
        {
            return Err(ParticipantsServiceError::DuplicateParticipant);
        }

        let participant = self.insert_with_fresh_id(registration).await?;
        tracing::info!(participant_id = %participant.id, "participant registered");

        let template = Template::RegistrationSuccess {
            name: participant.full_name(),
            distance: participant.distance.clone(),
            participant_id: participant.id.to_string(),
        };
        let outcome = self
            .notifier
            .send(&participant.phone_number, &template)
            .await;
        if !outcome.ok {
            tracing::warn!(
                participant_id = %participant.id,
                detail = %outcome.message,
                "registration message not delivered"
            );
        }
        Ok(participant)
    }

    async fn insert_with_fresh_id(
        &self,
        registration: NewParticipant,
    ) -> Result<Participant, ParticipantsServiceError> {
        let now = Utc::now();
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = ParticipantId::generate();
            // The pre-check keeps the common collision cheap; the conditional
            // insert closes the race between check and write.
            if self.participants.exists(&id).await? {
                tracing::debug!(attempt, "participant id collision, regenerating");
                continue;
            }
            let participant = Participant::register(id, registration.clone(), now);
            if self.participants.insert_if_absent(&participant).await? {
                return Ok(participant);
            }
            tracing::debug!(attempt, "participant id taken concurrently, regenerating");
        }
        Err(anyhow::anyhow!("no free participant id after {MAX_ID_ATTEMPTS} attempts").into())
    }
}

// ── CheckDuplicate ───────────────────────────────────────────────────────────

pub struct CheckDuplicateInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
}

pub struct CheckDuplicateUseCase<R: ParticipantRepository> {
    pub participants: R,
}

impl<R: ParticipantRepository> CheckDuplicateUseCase<R> {
    pub async fn execute(&self, input: CheckDuplicateInput) -> Result<bool, ParticipantsServiceError> {
        let field = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };
        let (Some(first), Some(last), Some(phone)) = (
            field(&input.first_name),
            field(&input.last_name),
            field(&input.phone_number),
        ) else {
            return Err(ParticipantsServiceError::MissingField("Missing required fields"));
        };
        self.participants.find_duplicate(&first, &last, &phone).await
    }
}
