use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use marathon_domain::id::{AdminId, ParticipantId};
use marathon_domain::search::{FilterFields, ParticipantFilter, Relevance, SearchFields};

use crate::error::ParticipantsServiceError;

/// Give up allocating a participant id after this many collisions.
pub const MAX_ID_ATTEMPTS: usize = 10;

// ── Participant ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Participant {
    /// A fresh record for `registration` under `id`, with every operational
    /// flag cleared.
    pub fn register(id: ParticipantId, registration: NewParticipant, now: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: registration.first_name,
            middle_name: registration.middle_name,
            last_name: registration.last_name,
            email: registration.email,
            phone_number: registration.phone_number,
            gender: registration.gender,
            gotra: registration.gotra,
            birthdate: registration.birthdate,
            age: registration.age,
            address: registration.address,
            emergency_contact_name: registration.emergency_contact_name,
            emergency_contact_relation: registration.emergency_contact_relation,
            emergency_contact_phone: registration.emergency_contact_phone,
            distance: registration.distance,
            tshirt_size: registration.tshirt_size,
            medical_conditions: registration.medical_conditions,
            medications: registration.medications,
            allergies: registration.allergies,
            accepted_declaration: registration.accepted_declaration,
            bib_num: None,
            is_bib_given: false,
            is_tshirt_given: false,
            counter_no: None,
            pass_link: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn search_fields(&self) -> SearchFields<'_> {
        SearchFields {
            id: self.id.as_str(),
            bib_num: self.bib_num.as_deref(),
            first_name: &self.first_name,
            middle_name: self.middle_name.as_deref(),
            last_name: &self.last_name,
            email: &self.email,
            phone_number: &self.phone_number,
        }
    }

    pub fn filter_fields(&self) -> FilterFields<'_> {
        FilterFields {
            distance: &self.distance,
            tshirt_size: &self.tshirt_size,
            is_bib_given: self.is_bib_given,
            is_tshirt_given: self.is_tshirt_given,
        }
    }

    pub fn matches(&self, filter: &ParticipantFilter) -> bool {
        filter.matches(&self.search_fields(), &self.filter_fields())
    }

    /// Write every field `update` carries.
    pub fn apply(&mut self, update: &ParticipantUpdate, now: DateTime<Utc>) {
        fn set<T: Clone>(slot: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }
        set(&mut self.first_name, &update.first_name);
        set(&mut self.middle_name, &update.middle_name);
        set(&mut self.last_name, &update.last_name);
        set(&mut self.email, &update.email);
        set(&mut self.phone_number, &update.phone_number);
        set(&mut self.gender, &update.gender);
        set(&mut self.gotra, &update.gotra);
        set(&mut self.birthdate, &update.birthdate);
        set(&mut self.age, &update.age);
        set(&mut self.address, &update.address);
        set(&mut self.emergency_contact_name, &update.emergency_contact_name);
        set(
            &mut self.emergency_contact_relation,
            &update.emergency_contact_relation,
        );
        set(&mut self.emergency_contact_phone, &update.emergency_contact_phone);
        set(&mut self.distance, &update.distance);
        set(&mut self.tshirt_size, &update.tshirt_size);
        set(&mut self.medical_conditions, &update.medical_conditions);
        set(&mut self.medications, &update.medications);
        set(&mut self.allergies, &update.allergies);
        set(&mut self.accepted_declaration, &update.accepted_declaration);
        set(&mut self.bib_num, &update.bib_num);
        set(&mut self.is_bib_given, &update.is_bib_given);
        set(&mut self.is_tshirt_given, &update.is_tshirt_given);
        set(&mut self.counter_no, &update.counter_no);
        set(&mut self.pass_link, &update.pass_link);
        self.updated_at = now;
    }

    pub fn apply_check_in(&mut self, check_in: &CheckIn, now: DateTime<Utc>) {
        self.apply(&check_in.clone().into_update(), now);
    }
}

/// A listing row, with its rank when the listing was a free-text search.
#[derive(Debug, Clone)]
pub struct RankedParticipant {
    pub participant: Participant,
    pub relevance: Option<Relevance>,
}

// ── Registration ─────────────────────────────────────────────────────────────

/// A validated registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParticipant {
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
}

/// The registration form as submitted: every field optional, strings untrimmed.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub gotra: Option<String>,
    pub birthdate: Option<String>,
    pub age: Option<i64>,
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

fn required(value: Option<String>, message: &'static str) -> Result<String, ParticipantsServiceError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_owned()),
        _ => Err(ParticipantsServiceError::MissingField(message)),
    }
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Accepts `YYYY-MM-DD`, or a full timestamp whose first ten characters are one.
pub fn parse_birthdate(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

impl RegistrationForm {
    pub fn validate(self) -> Result<NewParticipant, ParticipantsServiceError> {
        let birthdate = required(self.birthdate, "Birthdate is required")?;
        let birthdate = parse_birthdate(&birthdate).ok_or_else(|| {
            ParticipantsServiceError::Validation("Birthdate must be a YYYY-MM-DD date".into())
        })?;
        let age = match self.age {
            None => return Err(ParticipantsServiceError::MissingField("Age is required")),
            Some(age) if age <= 0 => {
                return Err(ParticipantsServiceError::Validation(
                    "Age must be a positive number".into(),
                ));
            }
            Some(age) => i32::try_from(age).map_err(|_| {
                ParticipantsServiceError::Validation("Age is out of range".into())
            })?,
        };
        if !self.accepted_declaration {
            return Err(ParticipantsServiceError::Validation(
                "The declaration must be accepted".into(),
            ));
        }

        Ok(NewParticipant {
            first_name: required(self.first_name, "First name is required")?,
            middle_name: optional(self.middle_name),
            last_name: required(self.last_name, "Last name is required")?,
            email: required(self.email, "Email is required")?,
            phone_number: required(self.phone_number, "Phone number is required")?,
            gender: required(self.gender, "Gender is required")?,
            gotra: optional(self.gotra),
            birthdate,
            age,
            address: required(self.address, "Address is required")?,
            emergency_contact_name: required(
                self.emergency_contact_name,
                "Emergency contact name is required",
            )?,
            emergency_contact_relation: required(
                self.emergency_contact_relation,
                "Emergency contact relation is required",
            )?,
            emergency_contact_phone: required(
                self.emergency_contact_phone,
                "Emergency contact phone is required",
            )?,
            distance: required(self.distance, "Distance is required")?,
            tshirt_size: required(self.tshirt_size, "T-shirt size is required")?,
            medical_conditions: optional(self.medical_conditions),
            medications: optional(self.medications),
            allergies: optional(self.allergies),
            accepted_declaration: true,
        })
    }
}

// ── Updates ──────────────────────────────────────────────────────────────────

/// Admin full edit. `None` leaves a field untouched; for nullable columns
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantUpdate {
    pub first_name: Option<String>,
    pub middle_name: Option<Option<String>>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<String>,
    pub gotra: Option<Option<String>>,
    pub birthdate: Option<NaiveDate>,
    pub age: Option<i32>,
    pub address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_relation: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub distance: Option<String>,
    pub tshirt_size: Option<String>,
    pub medical_conditions: Option<Option<String>>,
    pub medications: Option<Option<String>>,
    pub allergies: Option<Option<String>>,
    pub accepted_declaration: Option<bool>,
    pub bib_num: Option<Option<String>>,
    pub is_bib_given: Option<bool>,
    pub is_tshirt_given: Option<bool>,
    pub counter_no: Option<Option<String>>,
    pub pass_link: Option<Option<String>>,
}

/// The counter-desk update: only these four fields may change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckIn {
    pub bib_num: Option<Option<String>>,
    pub counter_no: Option<Option<String>>,
    pub is_bib_given: Option<bool>,
    pub is_tshirt_given: Option<bool>,
}

impl CheckIn {
    pub fn is_empty(&self) -> bool {
        self.bib_num.is_none()
            && self.counter_no.is_none()
            && self.is_bib_given.is_none()
            && self.is_tshirt_given.is_none()
    }

    pub fn into_update(self) -> ParticipantUpdate {
        ParticipantUpdate {
            bib_num: self.bib_num,
            counter_no: self.counter_no,
            is_bib_given: self.is_bib_given,
            is_tshirt_given: self.is_tshirt_given,
            ..Default::default()
        }
    }
}

// ── Scan log ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanLog {
    pub id: Uuid,
    pub participant_id: ParticipantId,
    pub admin_id: AdminId,
    pub scanned_at: DateTime<Utc>,
}

impl ScanLog {
    pub fn record(participant_id: ParticipantId, admin_id: AdminId, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            participant_id,
            admin_id,
            scanned_at: now,
        }
    }
}
