use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use marathon_auth::domain::repository::{AdminRepository, OtpRepository};
use marathon_auth::domain::types::{Admin, OneTimeCode};
use marathon_auth::error::AuthServiceError;

// ── MockOtpRepo ──────────────────────────────────────────────────────────────

pub struct MockOtpRepo {
    pub codes: Arc<Mutex<Vec<OneTimeCode>>>,
    /// Simulates another request deleting or replacing the row between the
    /// read and the conditional delete.
    pub lose_consume_race: bool,
}

impl MockOtpRepo {
    pub fn new(codes: Vec<OneTimeCode>) -> Self {
        Self {
            codes: Arc::new(Mutex::new(codes)),
            lose_consume_race: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// A second repo over the same rows, like a second request on one table.
    pub fn share(&self) -> Self {
        Self {
            codes: Arc::clone(&self.codes),
            lose_consume_race: false,
        }
    }

    /// Returns a shared handle to the internal code list for post-execution inspection.
    pub fn codes_handle(&self) -> Arc<Mutex<Vec<OneTimeCode>>> {
        Arc::clone(&self.codes)
    }
}

impl OtpRepository for MockOtpRepo {
    async fn upsert(&self, code: &OneTimeCode) -> Result<(), AuthServiceError> {
        let mut codes = self.codes.lock().unwrap();
        codes.retain(|c| c.phone_number != code.phone_number);
        codes.push(code.clone());
        Ok(())
    }

    async fn find(&self, phone_number: &str) -> Result<Option<OneTimeCode>, AuthServiceError> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.phone_number == phone_number)
            .cloned())
    }

    async fn consume(&self, phone_number: &str, code: &str) -> Result<bool, AuthServiceError> {
        if self.lose_consume_race {
            return Ok(false);
        }
        let mut codes = self.codes.lock().unwrap();
        let before = codes.len();
        codes.retain(|c| !(c.phone_number == phone_number && c.code == code));
        Ok(codes.len() < before)
    }
}

// ── MockAdminRepo ────────────────────────────────────────────────────────────

pub struct MockAdminRepo {
    pub admins: Arc<Mutex<Vec<Admin>>>,
}

impl MockAdminRepo {
    pub fn new(admins: Vec<Admin>) -> Self {
        Self {
            admins: Arc::new(Mutex::new(admins)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn admins_handle(&self) -> Arc<Mutex<Vec<Admin>>> {
        Arc::clone(&self.admins)
    }
}

impl AdminRepository for MockAdminRepo {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AuthServiceError> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn upsert(&self, admin: &Admin) -> Result<(), AuthServiceError> {
        let mut admins = self.admins.lock().unwrap();
        match admins.iter_mut().find(|a| a.username == admin.username) {
            Some(existing) => existing.password_hash = admin.password_hash.clone(),
            None => admins.push(admin.clone()),
        }
        Ok(())
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub const TEST_PHONE: &str = "+919812345678";

/// Hashed at bcrypt's minimum cost to keep tests fast.
pub fn test_admin(username: &str, password: &str) -> Admin {
    Admin {
        id: Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap(),
        username: username.to_owned(),
        password_hash: bcrypt::hash(password, 4).unwrap(),
        created_at: Utc::now(),
    }
}

pub fn live_code(phone_number: &str, code: &str) -> OneTimeCode {
    OneTimeCode {
        phone_number: phone_number.to_owned(),
        code: code.to_owned(),
        expires_at: Utc::now() + chrono::Duration::minutes(10),
    }
}

pub fn expired_code(phone_number: &str, code: &str) -> OneTimeCode {
    OneTimeCode {
        phone_number: phone_number.to_owned(),
        code: code.to_owned(),
        expires_at: Utc::now() - chrono::Duration::seconds(1),
    }
}
