//! JSON projections of [`Participant`]. Field names follow the web client.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::types::{Participant, RankedParticipant, ScanLog};

/// Every column, for admin views and the participant's own passes.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub gender: String,
    pub gotra: Option<String>,
    pub birthdate: NaiveDate,
    pub age: i32,
    pub address: String,
    pub emergency_contact_name: String,
    pub emergency_contact_relation: String,
    pub emergency_contact_phone: String,
    pub distance: String,
    pub tshirt_size: String,
    pub medical_conditions: Option<String>,
    pub medications: Option<String>,
    pub allergies: Option<String>,
    pub accepted_declaration: bool,
    pub bib_num: Option<String>,
    pub is_bib_given: bool,
    pub is_tshirt_given: bool,
    pub counter_no: Option<String>,
    pub pass_link: Option<String>,
    #[serde(serialize_with = "marathon_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "marathon_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Participant> for ParticipantResponse {
    fn from(p: Participant) -> Self {
        Self {
            id: p.id.into_inner(),
            first_name: p.first_name,
            middle_name: p.middle_name,
            last_name: p.last_name,
            email: p.email,
            phone_number: p.phone_number,
            gender: p.gender,
            gotra: p.gotra,
            birthdate: p.birthdate,
            age: p.age,
            address: p.address,
            emergency_contact_name: p.emergency_contact_name,
            emergency_contact_relation: p.emergency_contact_relation,
            emergency_contact_phone: p.emergency_contact_phone,
            distance: p.distance,
            tshirt_size: p.tshirt_size,
            medical_conditions: p.medical_conditions,
            medications: p.medications,
            allergies: p.allergies,
            accepted_declaration: p.accepted_declaration,
            bib_num: p.bib_num,
            is_bib_given: p.is_bib_given,
            is_tshirt_given: p.is_tshirt_given,
            counter_no: p.counter_no,
            pass_link: p.pass_link,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Admin listing row: the full record plus its search rank.
#[derive(Serialize)]
pub struct RankedParticipantResponse {
    #[serde(flatten)]
    pub participant: ParticipantResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<i32>,
}

impl From<RankedParticipant> for RankedParticipantResponse {
    fn from(ranked: RankedParticipant) -> Self {
        Self {
            participant: ranked.participant.into(),
            relevance: ranked.relevance.map(|r| r.rank()),
        }
    }
}

/// What an unauthenticated pass scan may see. No contact details beyond the
/// emergency contact, no address, no operational flags.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicParticipantResponse {
    pub id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub distance: String,
    pub tshirt_size: String,
    pub gender: String,
    pub age: i32,
    pub gotra: Option<String>,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub medical_conditions: Option<String>,
    pub medications: Option<String>,
    pub allergies: Option<String>,
}

impl From<Participant> for PublicParticipantResponse {
    fn from(p: Participant) -> Self {
        Self {
            id: p.id.into_inner(),
            first_name: p.first_name,
            middle_name: p.middle_name,
            last_name: p.last_name,
            distance: p.distance,
            tshirt_size: p.tshirt_size,
            gender: p.gender,
            age: p.age,
            gotra: p.gotra,
            emergency_contact_name: p.emergency_contact_name,
            emergency_contact_phone: p.emergency_contact_phone,
            medical_conditions: p.medical_conditions,
            medications: p.medications,
            allergies: p.allergies,
        }
    }
}

/// Sibling registration shown next to the one being checked in.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedParticipantResponse {
    pub id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub bib_num: Option<String>,
    pub is_bib_given: bool,
    pub is_tshirt_given: bool,
    pub tshirt_size: String,
    pub distance: String,
}

impl From<Participant> for RelatedParticipantResponse {
    fn from(p: Participant) -> Self {
        Self {
            id: p.id.into_inner(),
            first_name: p.first_name,
            middle_name: p.middle_name,
            last_name: p.last_name,
            bib_num: p.bib_num,
            is_bib_given: p.is_bib_given,
            is_tshirt_given: p.is_tshirt_given,
            tshirt_size: p.tshirt_size,
            distance: p.distance,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanLogResponse {
    pub id: String,
    pub user_id: String,
    pub admin_id: String,
    #[serde(serialize_with = "marathon_core::serde::to_rfc3339_ms")]
    pub scanned_at: DateTime<Utc>,
}

impl From<ScanLog> for ScanLogResponse {
    fn from(log: ScanLog) -> Self {
        Self {
            id: log.id.to_string(),
            user_id: log.participant_id.into_inner(),
            admin_id: log.admin_id.to_string(),
            scanned_at: log.scanned_at,
        }
    }
}
