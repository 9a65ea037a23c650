use anyhow::Context as _;
use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::sea_query::{Asterisk, Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{self, Set, Unchanged},
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, Statement, Value,
};

use marathon_core::sea_ext::{ilike_contains, ilike_equals};
use marathon_domain::id::ParticipantId;
use marathon_domain::pagination::PageMode;
use marathon_domain::search::ParticipantFilter;
use marathon_participants_schema::{participants, scan_logs};

use crate::domain::repository::{
    ParticipantRepository, ScanLogRepository, SearchPage, StatsRepository,
};
use crate::domain::stats::{Bucket, CounterRow, StatsSnapshot};
use crate::domain::types::{CheckIn, Participant, ParticipantUpdate, ScanLog};
use crate::error::ParticipantsServiceError;
use crate::infra::query;

// ── Participant repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbParticipantRepository {
    pub db: DatabaseConnection,
}

impl DbParticipantRepository {
    /// Write only the columns `update` carries; concurrent edits to other
    /// columns survive.
    async fn write(
        &self,
        id: &ParticipantId,
        update: &ParticipantUpdate,
    ) -> Result<Option<Participant>, ParticipantsServiceError> {
        match update_model(id, update).update(&self.db).await {
            Ok(model) => Ok(Some(participant_from_model(model)?)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(write_error(e, "update participant")),
        }
    }

    async fn all_where(
        &self,
        select: sea_orm::Select<participants::Entity>,
        context: &'static str,
    ) -> Result<Vec<Participant>, ParticipantsServiceError> {
        let models = select.all(&self.db).await.context(context)?;
        models
            .into_iter()
            .map(participant_from_model)
            .collect::<anyhow::Result<_>>()
            .map_err(Into::into)
    }
}

/// A unique violation can only come from the name and phone identity index.
fn write_error(err: DbErr, context: &'static str) -> ParticipantsServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!(detail = %detail, "participant identity already stored");
            ParticipantsServiceError::DuplicateParticipant
        }
        _ => anyhow::Error::new(err).context(context).into(),
    }
}

impl ParticipantRepository for DbParticipantRepository {
    async fn exists(&self, id: &ParticipantId) -> Result<bool, ParticipantsServiceError> {
        let count = participants::Entity::find_by_id(id.as_str().to_owned())
            .count(&self.db)
            .await
            .context("check participant id")?;
        Ok(count > 0)
    }

    async fn insert_if_absent(
        &self,
        participant: &Participant,
    ) -> Result<bool, ParticipantsServiceError> {
        // ON CONFLICT (id) DO NOTHING: a concurrent registration that drew the
        // same id makes this a zero-row insert instead of an error. The
        // identity index has no such clause and still raises.
        let inserted = participants::Entity::insert(active_model(participant))
            .on_conflict(
                OnConflict::column(participants::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| write_error(e, "insert participant"))?;
        Ok(inserted > 0)
    }

    async fn find_by_id(
        &self,
        id: &ParticipantId,
    ) -> Result<Option<Participant>, ParticipantsServiceError> {
        let model = participants::Entity::find_by_id(id.as_str().to_owned())
            .one(&self.db)
            .await
            .context("find participant by id")?;
        Ok(model.map(participant_from_model).transpose()?)
    }

    async fn find_duplicate(
        &self,
        first_name: &str,
        last_name: &str,
        phone_number: &str,
    ) -> Result<bool, ParticipantsServiceError> {
        let count = participants::Entity::find()
            .filter(ilike_equals(participants::Column::FirstName, first_name))
            .filter(ilike_equals(participants::Column::LastName, last_name))
            .filter(participants::Column::PhoneNumber.eq(phone_number))
            .count(&self.db)
            .await
            .context("find duplicate participant")?;
        Ok(count > 0)
    }

    async fn list_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Vec<Participant>, ParticipantsServiceError> {
        let select = participants::Entity::find()
            .filter(participants::Column::PhoneNumber.eq(phone_number))
            .order_by_asc(participants::Column::FirstName)
            .order_by_asc(participants::Column::Id);
        self.all_where(select, "list participants by phone").await
    }

    async fn search(
        &self,
        filter: &ParticipantFilter,
        mode: PageMode,
    ) -> Result<SearchPage, ParticipantsServiceError> {
        let total = query::count_select(filter)
            .count(&self.db)
            .await
            .context("count participants")?;
        let rows = self
            .all_where(query::search_select(filter, mode), "search participants")
            .await?;
        Ok(SearchPage { rows, total })
    }

    async fn update(
        &self,
        id: &ParticipantId,
        update: &ParticipantUpdate,
    ) -> Result<Option<Participant>, ParticipantsServiceError> {
        self.write(id, update).await
    }

    async fn check_in(
        &self,
        id: &ParticipantId,
        check_in: &CheckIn,
    ) -> Result<Option<Participant>, ParticipantsServiceError> {
        self.write(id, &check_in.clone().into_update()).await
    }

    async fn list_all(&self) -> Result<Vec<Participant>, ParticipantsServiceError> {
        let select = participants::Entity::find().order_by_asc(participants::Column::CreatedAt);
        self.all_where(select, "list all participants").await
    }

    async fn list_by_phone_containing(
        &self,
        digits: &str,
    ) -> Result<Vec<Participant>, ParticipantsServiceError> {
        let select = participants::Entity::find()
            .filter(ilike_contains(participants::Column::PhoneNumber, digits))
            .order_by_asc(participants::Column::CreatedAt);
        self.all_where(select, "list participants by phone fragment")
            .await
    }
}

fn participant_from_model(model: participants::Model) -> anyhow::Result<Participant> {
    let id = model
        .id
        .parse()
        .with_context(|| format!("stored participant id {:?}", model.id))?;
    Ok(Participant {
        id,
        first_name: model.first_name,
        middle_name: model.middle_name,
        last_name: model.last_name,
        email: model.email,
        phone_number: model.phone_number,
        gender: model.gender,
        gotra: model.gotra,
        birthdate: model.birthdate,
        age: model.age,
        address: model.address,
        emergency_contact_name: model.emergency_contact_name,
        emergency_contact_relation: model.emergency_contact_relation,
        emergency_contact_phone: model.emergency_contact_phone,
        distance: model.distance,
        tshirt_size: model.tshirt_size,
        medical_conditions: model.medical_conditions,
        medications: model.medications,
        allergies: model.allergies,
        accepted_declaration: model.accepted_declaration,
        bib_num: model.bib_num,
        is_bib_given: model.is_bib_given,
        is_tshirt_given: model.is_tshirt_given,
        counter_no: model.counter_no,
        pass_link: model.pass_link,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn active_model(p: &Participant) -> participants::ActiveModel {
    participants::ActiveModel {
        id: Set(p.id.as_str().to_owned()),
        first_name: Set(p.first_name.clone()),
        middle_name: Set(p.middle_name.clone()),
        last_name: Set(p.last_name.clone()),
        email: Set(p.email.clone()),
        phone_number: Set(p.phone_number.clone()),
        gender: Set(p.gender.clone()),
        gotra: Set(p.gotra.clone()),
        birthdate: Set(p.birthdate),
        age: Set(p.age),
        address: Set(p.address.clone()),
        emergency_contact_name: Set(p.emergency_contact_name.clone()),
        emergency_contact_relation: Set(p.emergency_contact_relation.clone()),
        emergency_contact_phone: Set(p.emergency_contact_phone.clone()),
        distance: Set(p.distance.clone()),
        tshirt_size: Set(p.tshirt_size.clone()),
        medical_conditions: Set(p.medical_conditions.clone()),
        medications: Set(p.medications.clone()),
        allergies: Set(p.allergies.clone()),
        accepted_declaration: Set(p.accepted_declaration),
        bib_num: Set(p.bib_num.clone()),
        is_bib_given: Set(p.is_bib_given),
        is_tshirt_given: Set(p.is_tshirt_given),
        counter_no: Set(p.counter_no.clone()),
        pass_link: Set(p.pass_link.clone()),
        created_at: Set(p.created_at),
        updated_at: Set(p.updated_at),
    }
}

fn set_present<V>(slot: &mut ActiveValue<V>, value: &Option<V>)
where
    V: Into<Value> + Clone,
{
    if let Some(v) = value {
        *slot = Set(v.clone());
    }
}

/// Partial active model: the primary key, `updated_at`, and whatever
/// `update` carries. Everything else stays `NotSet`.
fn update_model(id: &ParticipantId, u: &ParticipantUpdate) -> participants::ActiveModel {
    let mut am = participants::ActiveModel {
        id: Unchanged(id.as_str().to_owned()),
        updated_at: Set(Utc::now()),
        ..Default::default()
    };
    set_present(&mut am.first_name, &u.first_name);
    set_present(&mut am.middle_name, &u.middle_name);
    set_present(&mut am.last_name, &u.last_name);
    set_present(&mut am.email, &u.email);
    set_present(&mut am.phone_number, &u.phone_number);
    set_present(&mut am.gender, &u.gender);
    set_present(&mut am.gotra, &u.gotra);
    set_present(&mut am.birthdate, &u.birthdate);
    set_present(&mut am.age, &u.age);
    set_present(&mut am.address, &u.address);
    set_present(&mut am.emergency_contact_name, &u.emergency_contact_name);
    set_present(&mut am.emergency_contact_relation, &u.emergency_contact_relation);
    set_present(&mut am.emergency_contact_phone, &u.emergency_contact_phone);
    set_present(&mut am.distance, &u.distance);
    set_present(&mut am.tshirt_size, &u.tshirt_size);
    set_present(&mut am.medical_conditions, &u.medical_conditions);
    set_present(&mut am.medications, &u.medications);
    set_present(&mut am.allergies, &u.allergies);
    set_present(&mut am.accepted_declaration, &u.accepted_declaration);
    set_present(&mut am.bib_num, &u.bib_num);
    set_present(&mut am.is_bib_given, &u.is_bib_given);
    set_present(&mut am.is_tshirt_given, &u.is_tshirt_given);
    set_present(&mut am.counter_no, &u.counter_no);
    set_present(&mut am.pass_link, &u.pass_link);
    am
}

// ── Scan log repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbScanLogRepository {
    pub db: DatabaseConnection,
}

impl ScanLogRepository for DbScanLogRepository {
    async fn append(&self, log: &ScanLog) -> Result<(), ParticipantsServiceError> {
        scan_logs::Entity::insert(scan_logs::ActiveModel {
            id: Set(log.id),
            participant_id: Set(log.participant_id.as_str().to_owned()),
            admin_id: Set(log.admin_id.0),
            scanned_at: Set(log.scanned_at),
        })
        .exec_without_returning(&self.db)
        .await
        .context("append scan log")?;
        Ok(())
    }
}

// ── Stats repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbStatsRepository {
    pub db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct TotalsRow {
    total: i64,
    bibs: i64,
    tshirts: i64,
}

#[derive(Debug, FromQueryResult)]
struct DayRow {
    day: NaiveDate,
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct BucketRow {
    name: String,
    value: i64,
}

#[derive(Debug, FromQueryResult)]
struct CounterQueryRow {
    counter_no: Option<String>,
    total: i64,
    bibs: i64,
    tshirts: i64,
}

fn count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

impl DbStatsRepository {
    async fn buckets(
        &self,
        column: participants::Column,
    ) -> Result<Vec<Bucket>, ParticipantsServiceError> {
        let rows = participants::Entity::find()
            .select_only()
            .column_as(column, "name")
            .column_as(Expr::col(Asterisk).count(), "value")
            .group_by(column)
            .order_by_asc(column)
            .into_model::<BucketRow>()
            .all(&self.db)
            .await
            .context("group participants")?;
        Ok(rows
            .into_iter()
            .map(|r| Bucket {
                name: r.name,
                value: count(r.value),
            })
            .collect())
    }
}

impl StatsRepository for DbStatsRepository {
    async fn snapshot(&self, since: NaiveDate) -> Result<StatsSnapshot, ParticipantsServiceError> {
        let backend = self.db.get_database_backend();

        let totals = TotalsRow::find_by_statement(Statement::from_string(
            backend,
            "SELECT COUNT(*) AS total, \
                    COUNT(*) FILTER (WHERE is_bib_given) AS bibs, \
                    COUNT(*) FILTER (WHERE is_tshirt_given) AS tshirts \
             FROM participants",
        ))
        .one(&self.db)
        .await
        .context("count participant totals")?
        .context("totals query returned no row")?;

        let since = since.and_time(NaiveTime::MIN).and_utc();
        let daily = DayRow::find_by_statement(Statement::from_sql_and_values(
            backend,
            "SELECT (created_at AT TIME ZONE 'UTC')::date AS day, COUNT(*) AS count \
             FROM participants \
             WHERE created_at >= $1 \
             GROUP BY 1",
            [since.into()],
        ))
        .all(&self.db)
        .await
        .context("count daily registrations")?;

        let counters = CounterQueryRow::find_by_statement(Statement::from_string(
            backend,
            "SELECT counter_no, \
                    COUNT(*) AS total, \
                    COUNT(*) FILTER (WHERE is_bib_given) AS bibs, \
                    COUNT(*) FILTER (WHERE is_tshirt_given) AS tshirts \
             FROM participants \
             WHERE counter_no IS NOT NULL \
             GROUP BY counter_no",
        ))
        .all(&self.db)
        .await
        .context("count per counter")?;

        Ok(StatsSnapshot {
            total: count(totals.total),
            bibs_given: count(totals.bibs),
            tshirts_given: count(totals.tshirts),
            daily: daily.into_iter().map(|r| (r.day, count(r.count))).collect(),
            by_distance: self.buckets(participants::Column::Distance).await?,
            by_tshirt_size: self.buckets(participants::Column::TshirtSize).await?,
            by_gender: self.buckets(participants::Column::Gender).await?,
            counters: counters
                .into_iter()
                .map(|r| CounterRow {
                    counter_no: r.counter_no,
                    total: count(r.total),
                    bibs: count(r.bibs),
                    tshirts: count(r.tshirts),
                })
                .collect(),
        })
    }
}
