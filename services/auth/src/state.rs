use sea_orm::DatabaseConnection;

use marathon_auth_types::bearer::JwtSecretSource;
use marathon_core::health::HasDatabase;
use marathon_notify::DovesoftSender;

use crate::infra::db::{DbAdminRepository, DbOtpRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub notifier: DovesoftSender,
    pub jwt_secret: String,
    pub admin_token_ttl_secs: u64,
    pub session_token_ttl_secs: u64,
}

impl AppState {
    pub fn admin_repo(&self) -> DbAdminRepository {
        DbAdminRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }
}

impl JwtSecretSource for AppState {
    fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
}

impl HasDatabase for AppState {
    fn database(&self) -> &DatabaseConnection {
        &self.db
    }
}
