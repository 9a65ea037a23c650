use chrono::{DateTime, Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

/// A back-office operator. Provisioned out of band; read-only at runtime.
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    /// bcrypt hash.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The live one-time code for a phone number. At most one per phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimeCode {
    pub phone_number: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl OneTimeCode {
    /// Fresh code for `phone_number`, expiring [`OTP_TTL_SECS`] after `now`.
    pub fn issue(phone_number: String, now: DateTime<Utc>) -> Self {
        Self {
            phone_number,
            code: generate_code(),
            expires_at: now + Duration::seconds(OTP_TTL_SECS),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// One-time code time-to-live in seconds.
pub const OTP_TTL_SECS: i64 = 600;

/// Codes are six digits drawn uniformly from this range.
pub const OTP_RANGE: std::ops::RangeInclusive<u32> = 100_000..=999_999;

/// bcrypt work factor for newly provisioned admins.
pub const ADMIN_BCRYPT_COST: u32 = 10;

fn generate_code() -> String {
    rand::rng().random_range(OTP_RANGE).to_string()
}
