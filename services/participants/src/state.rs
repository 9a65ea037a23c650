use sea_orm::DatabaseConnection;

use marathon_auth_types::bearer::JwtSecretSource;
use marathon_core::health::HasDatabase;
use marathon_notify::DovesoftSender;

use crate::infra::db::{DbParticipantRepository, DbScanLogRepository, DbStatsRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub notifier: DovesoftSender,
    pub jwt_secret: String,
    pub pass_placeholder_url: String,
}

impl AppState {
    pub fn participant_repo(&self) -> DbParticipantRepository {
        DbParticipantRepository {
            db: self.db.clone(),
        }
    }

    pub fn scan_log_repo(&self) -> DbScanLogRepository {
        DbScanLogRepository {
            db: self.db.clone(),
        }
    }

    pub fn stats_repo(&self) -> DbStatsRepository {
        DbStatsRepository {
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
