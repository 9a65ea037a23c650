use chrono::Utc;

use marathon_domain::id::AdminId;
use marathon_domain::pagination::{PageMode, PageRequest, PageSummary};
use marathon_domain::search::ParticipantFilter;

use crate::domain::repository::{ParticipantRepository, ScanLogRepository};
use crate::domain::types::{CheckIn, Participant, ParticipantUpdate, RankedParticipant, ScanLog};
use crate::error::ParticipantsServiceError;
use crate::usecase::lookup::find;
use crate::usecase::parse_id;

// ── SearchParticipants ───────────────────────────────────────────────────────

pub struct SearchParticipantsInput {
    pub filter: ParticipantFilter,
    pub page: PageRequest,
    /// Return every match in one response.
    pub export: bool,
}

#[derive(Debug)]
pub struct SearchParticipantsOutput {
    pub users: Vec<RankedParticipant>,
    pub pagination: PageSummary,
}

pub struct SearchParticipantsUseCase<R: ParticipantRepository> {
    pub participants: R,
}

impl<R: ParticipantRepository> SearchParticipantsUseCase<R> {
    pub async fn execute(
        &self,
        input: SearchParticipantsInput,
    ) -> Result<SearchParticipantsOutput, ParticipantsServiceError> {
        let page = input.page.clamped();
        let mode = if input.export {
            PageMode::Export
        } else {
            PageMode::Paged(page)
        };

        let found = self.participants.search(&input.filter, mode).await?;
        let users = found
            .rows
            .into_iter()
            .map(|participant| RankedParticipant {
                relevance: input
                    .filter
                    .search
                    .as_ref()
                    .map(|terms| terms.relevance(&participant.search_fields())),
                participant,
            })
            .collect();

        Ok(SearchParticipantsOutput {
            users,
            pagination: PageSummary::new(found.total, page, mode),
        })
    }
}

// ── UpdateParticipant ────────────────────────────────────────────────────────

pub struct UpdateParticipantUseCase<R: ParticipantRepository> {
    pub participants: R,
}

impl<R: ParticipantRepository> UpdateParticipantUseCase<R> {
    pub async fn execute(
        &self,
        raw_id: &str,
        update: ParticipantUpdate,
    ) -> Result<Participant, ParticipantsServiceError> {
        validate_update(&update)?;
        let Some(id) = parse_id(raw_id) else {
            return Err(ParticipantsServiceError::ParticipantNotFound);
        };
        let participant = self
            .participants
            .update(&id, &update)
            .await?
            .ok_or(ParticipantsServiceError::ParticipantNotFound)?;
        tracing::info!(participant_id = %participant.id, "participant updated");
        Ok(participant)
    }
}

/// Required columns may be rewritten but not blanked.
fn validate_update(update: &ParticipantUpdate) -> Result<(), ParticipantsServiceError> {
    let required = [
        ("firstName", &update.first_name),
        ("lastName", &update.last_name),
        ("email", &update.email),
        ("phoneNumber", &update.phone_number),
        ("gender", &update.gender),
        ("address", &update.address),
        ("emergencyContactName", &update.emergency_contact_name),
        ("emergencyContactRelation", &update.emergency_contact_relation),
        ("emergencyContactPhone", &update.emergency_contact_phone),
        ("distance", &update.distance),
        ("tshirtSize", &update.tshirt_size),
    ];
    for (name, value) in required {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(ParticipantsServiceError::Validation(format!(
                "{name} cannot be blank"
            )));
        }
    }
    if update.age.is_some_and(|age| age <= 0) {
        return Err(ParticipantsServiceError::Validation(
            "Age must be a positive number".into(),
        ));
    }
    Ok(())
}

// ── CheckIn ──────────────────────────────────────────────────────────────────

pub struct CheckInUseCase<R: ParticipantRepository> {
    pub participants: R,
}

impl<R: ParticipantRepository> CheckInUseCase<R> {
    pub async fn execute(
        &self,
        raw_id: &str,
        check_in: CheckIn,
    ) -> Result<Participant, ParticipantsServiceError> {
        if check_in.is_empty() {
            return Err(ParticipantsServiceError::MissingField(
                "No check-in fields provided",
            ));
        }
        let Some(id) = parse_id(raw_id) else {
            return Err(ParticipantsServiceError::ParticipantNotFound);
        };
        let participant = self
            .participants
            .check_in(&id, &check_in)
            .await?
            .ok_or(ParticipantsServiceError::ParticipantNotFound)?;
        tracing::info!(
            participant_id = %participant.id,
            bib_given = participant.is_bib_given,
            tshirt_given = participant.is_tshirt_given,
            "participant checked in"
        );
        Ok(participant)
    }
}

// ── LogScan ──────────────────────────────────────────────────────────────────

pub struct LogScanInput {
    pub user_id: Option<String>,
    pub admin_id: AdminId,
}

pub struct LogScanUseCase<R, S>
where
    R: ParticipantRepository,
    S: ScanLogRepository,
{
    pub participants: R,
    pub scans: S,
}

impl<R, S> LogScanUseCase<R, S>
where
    R: ParticipantRepository,
    S: ScanLogRepository,
{
    pub async fn execute(&self, input: LogScanInput) -> Result<ScanLog, ParticipantsServiceError> {
        let raw_id = input
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ParticipantsServiceError::MissingField("User ID is required"))?;
        let participant = find(&self.participants, raw_id).await?;

        let log = ScanLog::record(participant.id, input.admin_id, Utc::now());
        self.scans.append(&log).await?;
        Ok(log)
    }
}
