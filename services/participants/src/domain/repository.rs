#![allow(async_fn_in_trait)]

use chrono::NaiveDate;

use marathon_domain::id::ParticipantId;
use marathon_domain::pagination::PageMode;
use marathon_domain::search::ParticipantFilter;

use crate::domain::stats::StatsSnapshot;
use crate::domain::types::{CheckIn, Participant, ParticipantUpdate, ScanLog};
use crate::error::ParticipantsServiceError;

/// One page of a filtered listing plus the count of every match.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub rows: Vec<Participant>,
    pub total: u64,
}

/// Repository for participant records.
pub trait ParticipantRepository: Send + Sync {
    async fn exists(&self, id: &ParticipantId) -> Result<bool, ParticipantsServiceError>;

    /// Insert unless the id is already taken. Returns `false` on an id
    /// conflict so the caller can draw a new id, and
    /// `DuplicateParticipant` when the name and phone are already stored.
    async fn insert_if_absent(
        &self,
        participant: &Participant,
    ) -> Result<bool, ParticipantsServiceError>;

    async fn find_by_id(
        &self,
        id: &ParticipantId,
    ) -> Result<Option<Participant>, ParticipantsServiceError>;

    /// Whether a participant with this name (case-insensitive) and exact phone
    /// number is already registered.
    async fn find_duplicate(
        &self,
        first_name: &str,
        last_name: &str,
        phone_number: &str,
    ) -> Result<bool, ParticipantsServiceError>;

    /// Every registration under `phone_number`, by first name.
    async fn list_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Vec<Participant>, ParticipantsServiceError>;

    /// Rows matching `filter`, ranked when it carries a free-text search,
    /// otherwise newest first.
    async fn search(
        &self,
        filter: &ParticipantFilter,
        mode: PageMode,
    ) -> Result<SearchPage, ParticipantsServiceError>;

    /// Apply an admin edit. `None` when the id does not exist;
    /// `DuplicateParticipant` when the edit collides with another
    /// participant's name and phone.
    async fn update(
        &self,
        id: &ParticipantId,
        update: &ParticipantUpdate,
    ) -> Result<Option<Participant>, ParticipantsServiceError>;

    /// Apply a counter-desk update, touching only the check-in columns.
    async fn check_in(
        &self,
        id: &ParticipantId,
        check_in: &CheckIn,
    ) -> Result<Option<Participant>, ParticipantsServiceError>;

    /// Every participant, oldest first. Used by bulk operator tools.
    async fn list_all(&self) -> Result<Vec<Participant>, ParticipantsServiceError>;

    /// Participants whose phone number contains `digits`.
    async fn list_by_phone_containing(
        &self,
        digits: &str,
    ) -> Result<Vec<Participant>, ParticipantsServiceError>;
}

/// Append-only check-in audit trail.
pub trait ScanLogRepository: Send + Sync {
    async fn append(&self, log: &ScanLog) -> Result<(), ParticipantsServiceError>;
}

/// Aggregate counts for the admin dashboard.
pub trait StatsRepository: Send + Sync {
    /// Totals and distributions, with daily registration counts from `since`.
    async fn snapshot(&self, since: NaiveDate) -> Result<StatsSnapshot, ParticipantsServiceError>;
}
