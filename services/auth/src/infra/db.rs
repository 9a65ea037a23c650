use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    sea_query::OnConflict,
};

use marathon_auth_schema::{admins, otps};

use crate::domain::repository::{AdminRepository, OtpRepository};
use crate::domain::types::{Admin, OneTimeCode};
use crate::error::AuthServiceError;

// ── Admin repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAdminRepository {
    pub db: DatabaseConnection,
}

impl AdminRepository for DbAdminRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AuthServiceError> {
        let model = admins::Entity::find()
            .filter(admins::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find admin by username")?;
        Ok(model.map(admin_from_model))
    }

    async fn upsert(&self, admin: &Admin) -> Result<(), AuthServiceError> {
        admins::Entity::insert(admins::ActiveModel {
            id: Set(admin.id),
            username: Set(admin.username.clone()),
            password: Set(admin.password_hash.clone()),
            created_at: Set(admin.created_at),
        })
        .on_conflict(
            OnConflict::column(admins::Column::Username)
                .update_column(admins::Column::Password)
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("upsert admin")?;
        Ok(())
    }
}

fn admin_from_model(model: admins::Model) -> Admin {
    Admin {
        id: model.id,
        username: model.username,
        password_hash: model.password,
        created_at: model.created_at,
    }
}

// ── OTP repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn upsert(&self, code: &OneTimeCode) -> Result<(), AuthServiceError> {
        // INSERT .. ON CONFLICT (phone_number) DO UPDATE: concurrent issues for
        // the same phone serialize on the key and the last writer wins.
        otps::Entity::insert(otps::ActiveModel {
            phone_number: Set(code.phone_number.clone()),
            code: Set(code.code.clone()),
            expires_at: Set(code.expires_at),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(otps::Column::PhoneNumber)
                .update_columns([
                    otps::Column::Code,
                    otps::Column::ExpiresAt,
                    otps::Column::CreatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("upsert otp")?;
        Ok(())
    }

    async fn find(&self, phone_number: &str) -> Result<Option<OneTimeCode>, AuthServiceError> {
        let model = otps::Entity::find_by_id(phone_number.to_owned())
            .one(&self.db)
            .await
            .context("find otp by phone number")?;
        Ok(model.map(otp_from_model))
    }

    async fn consume(&self, phone_number: &str, code: &str) -> Result<bool, AuthServiceError> {
        let result = otps::Entity::delete_many()
            .filter(otps::Column::PhoneNumber.eq(phone_number))
            .filter(otps::Column::Code.eq(code))
            .exec(&self.db)
            .await
            .context("consume otp")?;
        Ok(result.rows_affected > 0)
    }
}

fn otp_from_model(model: otps::Model) -> OneTimeCode {
    OneTimeCode {
        phone_number: model.phone_number,
        code: model.code,
        expires_at: model.expires_at,
    }
}
