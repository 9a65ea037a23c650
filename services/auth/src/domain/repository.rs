#![allow(async_fn_in_trait)]

use crate::domain::types::{Admin, OneTimeCode};
use crate::error::AuthServiceError;

/// Repository for admin operators.
pub trait AdminRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, AuthServiceError>;

    /// Insert, or replace the password hash when the username already exists.
    async fn upsert(&self, admin: &Admin) -> Result<(), AuthServiceError>;
}

/// Repository for one-time codes, keyed by phone number.
pub trait OtpRepository: Send + Sync {
    /// Write `code` as the only live code for its phone number, replacing any
    /// previous one in a single statement.
    async fn upsert(&self, code: &OneTimeCode) -> Result<(), AuthServiceError>;

    async fn find(&self, phone_number: &str) -> Result<Option<OneTimeCode>, AuthServiceError>;

    /// Delete the row only if it still holds `code`. Returns `false` when a
    /// concurrent verify or a re-issue got there first.
    async fn consume(&self, phone_number: &str, code: &str) -> Result<bool, AuthServiceError>;
}
