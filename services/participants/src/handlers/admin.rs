use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use marathon_auth_types::bearer::AdminIdentity;
use marathon_core::error::Success;
use marathon_core::serde::present;
use marathon_domain::pagination::{PageRequest, PageSummary};
use marathon_domain::search::{ParticipantFilter, SearchTerms, category, flag};

use crate::domain::stats::DashboardStats;
use crate::domain::types::{CheckIn, ParticipantUpdate, parse_birthdate};
use crate::error::ParticipantsServiceError;
use crate::handlers::registration::{ExistsResponse, NumberField, UserResponse};
use crate::handlers::response::{
    ParticipantResponse, RankedParticipantResponse, RelatedParticipantResponse, ScanLogResponse,
};
use crate::state::AppState;
use crate::usecase::admin::{
    CheckInUseCase, LogScanInput, LogScanUseCase, SearchParticipantsInput,
    SearchParticipantsUseCase, UpdateParticipantUseCase,
};
use crate::usecase::lookup::{
    CheckParticipantUseCase, GetParticipantUseCase, RelatedParticipantsUseCase,
};
use crate::usecase::stats::DashboardStatsUseCase;
use crate::usecase::ticket::SendTicketUseCase;

// ── GET /api/admin/users ─────────────────────────────────────────────────────

/// Every value arrives as text; blanks and unparsable numbers fall back to
/// their defaults rather than failing the listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub export: Option<String>,
    pub search: Option<String>,
    pub distance: Option<String>,
    pub tshirt_size: Option<String>,
    pub is_bib_given: Option<String>,
    pub is_tshirt_given: Option<String>,
}

impl ListQuery {
    fn page(&self) -> PageRequest {
        fn number(value: Option<&str>) -> Option<u32> {
            value.and_then(|v| v.trim().parse().ok())
        }
        let defaults = PageRequest::default();
        PageRequest {
            page: number(self.page.as_deref()).unwrap_or(defaults.page),
            limit: number(self.limit.as_deref()).unwrap_or(defaults.limit),
        }
    }

    fn filter(&self) -> ParticipantFilter {
        ParticipantFilter {
            search: self.search.as_deref().and_then(SearchTerms::parse),
            distance: category(self.distance.as_deref()),
            tshirt_size: category(self.tshirt_size.as_deref()),
            is_bib_given: flag(self.is_bib_given.as_deref()),
            is_tshirt_given: flag(self.is_tshirt_given.as_deref()),
        }
    }

    fn export(&self) -> bool {
        self.export.as_deref().map(str::trim) == Some("true")
    }
}

#[derive(Serialize)]
pub struct ListResponse {
    pub users: Vec<RankedParticipantResponse>,
    pub pagination: PageSummary,
}

pub async fn list_participants(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Success<ListResponse>, ParticipantsServiceError> {
    let query: ListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| ParticipantsServiceError::Validation("Invalid query string".into()))?
        .unwrap_or_default();

    let usecase = SearchParticipantsUseCase {
        participants: state.participant_repo(),
    };
    let out = usecase
        .execute(SearchParticipantsInput {
            filter: query.filter(),
            page: query.page(),
            export: query.export(),
        })
        .await?;
    Ok(Success::new(ListResponse {
        users: out.users.into_iter().map(Into::into).collect(),
        pagination: out.pagination,
    }))
}

// ── GET /api/admin/user/{id} ─────────────────────────────────────────────────

pub async fn get_participant(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Success<UserResponse<ParticipantResponse>>, ParticipantsServiceError> {
    let usecase = GetParticipantUseCase {
        participants: state.participant_repo(),
    };
    let participant = usecase.execute(&id).await?;
    Ok(Success::new(UserResponse {
        user: participant.into(),
    }))
}

// ── PUT /api/admin/user/{id} ─────────────────────────────────────────────────

/// Unknown keys (`id`, `createdAt`, ...) are ignored, so a client may send
/// back the record it fetched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateRequest {
    pub first_name: Option<String>,
    #[serde(deserialize_with = "present")]
    pub middle_name: Option<Option<String>>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    #[serde(deserialize_with = "present")]
    pub gotra: Option<Option<String>>,
    pub birthdate: Option<String>,
    pub age: Option<NumberField>,
    pub address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_relation: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub distance: Option<String>,
    pub tshirt_size: Option<String>,
    #[serde(deserialize_with = "present")]
    pub medical_conditions: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub medications: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub allergies: Option<Option<String>>,
    pub accepted_declaration: Option<bool>,
    #[serde(deserialize_with = "present")]
    pub bib_num: Option<Option<String>>,
    pub is_bib_given: Option<bool>,
    pub is_tshirt_given: Option<bool>,
    #[serde(deserialize_with = "present")]
    pub counter_no: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub pass_link: Option<Option<String>>,
}

impl UpdateRequest {
    fn into_update(self) -> Result<ParticipantUpdate, ParticipantsServiceError> {
        let birthdate = self
            .birthdate
            .as_deref()
            .map(|raw| {
                parse_birthdate(raw).ok_or_else(|| {
                    ParticipantsServiceError::Validation("Birthdate must be a YYYY-MM-DD date".into())
                })
            })
            .transpose()?;
        let age = self
            .age
            .as_ref()
            .map(|a| {
                let value = a.value("Age must be a positive number")?;
                i32::try_from(value)
                    .map_err(|_| ParticipantsServiceError::Validation("Age is out of range".into()))
            })
            .transpose()?;
        Ok(ParticipantUpdate {
            first_name: self.first_name,
            middle_name: self.middle_name,
            last_name: self.last_name,
            email: self.email,
            phone_number: self.phone_number,
            gender: self.gender,
            gotra: self.gotra,
            birthdate,
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
            bib_num: self.bib_num,
            is_bib_given: self.is_bib_given,
            is_tshirt_given: self.is_tshirt_given,
            counter_no: self.counter_no,
            pass_link: self.pass_link,
        })
    }
}

pub async fn update_participant(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<
        Json<UpdateRequest>,
        ParticipantsServiceError,
    >,
) -> Result<Success<UserResponse<ParticipantResponse>>, ParticipantsServiceError> {
    let usecase = UpdateParticipantUseCase {
        participants: state.participant_repo(),
    };
    let participant = usecase.execute(&id, body.into_update()?).await?;
    Ok(Success::new(UserResponse {
        user: participant.into(),
    }))
}

// ── PATCH /api/admin/user/{id}/check-in ──────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckInRequest {
    #[serde(deserialize_with = "present")]
    pub bib_num: Option<Option<String>>,
    #[serde(deserialize_with = "present")]
    pub counter_no: Option<Option<String>>,
    pub is_bib_given: Option<bool>,
    pub is_tshirt_given: Option<bool>,
}

pub async fn check_in_participant(
    admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(body), _): WithRejection<
        Json<CheckInRequest>,
        ParticipantsServiceError,
    >,
) -> Result<Success<UserResponse<ParticipantResponse>>, ParticipantsServiceError> {
    let usecase = CheckInUseCase {
        participants: state.participant_repo(),
    };
    let participant = usecase
        .execute(
            &id,
            CheckIn {
                bib_num: body.bib_num,
                counter_no: body.counter_no,
                is_bib_given: body.is_bib_given,
                is_tshirt_given: body.is_tshirt_given,
            },
        )
        .await?;
    tracing::debug!(admin = %admin.username, participant_id = %participant.id, "check-in by admin");
    Ok(Success::new(UserResponse {
        user: participant.into(),
    }))
}

// ── GET /api/admin/user/{id}/related ─────────────────────────────────────────

#[derive(Serialize)]
pub struct RelatedResponse {
    pub users: Vec<RelatedParticipantResponse>,
}

pub async fn related_participants(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Success<RelatedResponse>, ParticipantsServiceError> {
    let usecase = RelatedParticipantsUseCase {
        participants: state.participant_repo(),
    };
    let related = usecase.execute(&id).await?;
    Ok(Success::new(RelatedResponse {
        users: related.into_iter().map(Into::into).collect(),
    }))
}

// ── GET /api/admin/check-user/{id} ───────────────────────────────────────────

pub async fn check_participant(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Success<ExistsResponse>, ParticipantsServiceError> {
    let usecase = CheckParticipantUseCase {
        participants: state.participant_repo(),
    };
    let exists = usecase.execute(&id).await?;
    Ok(Success::new(ExistsResponse { exists }))
}

// ── POST /api/admin/log-scan ─────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogScanRequest {
    pub user_id: Option<String>,
}

#[derive(Serialize)]
pub struct LogScanResponse {
    pub log: ScanLogResponse,
}

pub async fn log_scan(
    admin: AdminIdentity,
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<
        Json<LogScanRequest>,
        ParticipantsServiceError,
    >,
) -> Result<Success<LogScanResponse>, ParticipantsServiceError> {
    let usecase = LogScanUseCase {
        participants: state.participant_repo(),
        scans: state.scan_log_repo(),
    };
    let log = usecase
        .execute(LogScanInput {
            user_id: body.user_id,
            admin_id: admin.id,
        })
        .await?;
    Ok(Success::new(LogScanResponse { log: log.into() }))
}

// ── GET /api/admin/dashboard-stats ───────────────────────────────────────────

#[derive(Serialize)]
pub struct StatsResponse {
    pub stats: DashboardStats,
}

pub async fn dashboard_stats(
    _admin: AdminIdentity,
    State(state): State<AppState>,
) -> Result<Success<StatsResponse>, ParticipantsServiceError> {
    let usecase = DashboardStatsUseCase {
        stats: state.stats_repo(),
    };
    let stats = usecase.execute().await?;
    Ok(Success::new(StatsResponse { stats }))
}

// ── POST /api/admin/user/{id}/ticket-confirmation ────────────────────────────

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn send_ticket_confirmation(
    _admin: AdminIdentity,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Success<MessageResponse>, ParticipantsServiceError> {
    let usecase = SendTicketUseCase {
        participants: state.participant_repo(),
        notifier: state.notifier.clone(),
        pass_placeholder: state.pass_placeholder_url.clone(),
    };
    let message = usecase.execute(&id).await?;
    Ok(Success::new(MessageResponse { message }))
}
