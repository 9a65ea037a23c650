use chrono::Utc;

use marathon_auth_types::token::{Principal, issue_token};
use marathon_notify::{NotificationSender, Template};

use crate::domain::repository::OtpRepository;
use crate::domain::types::OneTimeCode;
use crate::error::AuthServiceError;

fn required(value: &str, message: &'static str) -> Result<String, AuthServiceError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuthServiceError::MissingField(message));
    }
    Ok(trimmed.to_owned())
}

// ── IssueOtp ─────────────────────────────────────────────────────────────────

pub struct IssueOtpInput {
    pub phone_number: String,
}

pub struct IssueOtpUseCase<O, N>
where
    O: OtpRepository,
    N: NotificationSender,
{
    pub otps: O,
    pub notifier: N,
}

impl<O, N> IssueOtpUseCase<O, N>
where
    O: OtpRepository,
    N: NotificationSender,
{
    /// Store a fresh code (replacing any live one) and send it. The code is
    /// never returned to the caller.
    ///
    /// A delivery failure leaves the stored code in place; the next issue
    /// for the same phone overwrites it.
    pub async fn execute(&self, input: IssueOtpInput) -> Result<(), AuthServiceError> {
        let phone_number = required(&input.phone_number, "Phone number is required")?;

        let otp = OneTimeCode::issue(phone_number, Utc::now());
        self.otps.upsert(&otp).await?;

        let outcome = self
            .notifier
            .send(&otp.phone_number, &Template::Otp { code: otp.code })
            .await;
        if !outcome.ok {
            return Err(AuthServiceError::DeliveryFailed(outcome.message));
        }
        Ok(())
    }
}

// ── VerifyOtp ────────────────────────────────────────────────────────────────

pub struct VerifyOtpInput {
    pub phone_number: String,
    pub code: String,
}

#[derive(Debug)]
pub struct VerifyOtpOutput {
    /// Participant session token bound to the phone number.
    pub token: String,
    pub token_exp: u64,
}

pub struct VerifyOtpUseCase<O: OtpRepository> {
    pub otps: O,
    pub jwt_secret: String,
    pub session_ttl_secs: u64,
}

impl<O: OtpRepository> VerifyOtpUseCase<O> {
    pub async fn execute(&self, input: VerifyOtpInput) -> Result<VerifyOtpOutput, AuthServiceError> {
        const MISSING: &str = "Phone number and OTP are required";
        let phone_number = required(&input.phone_number, MISSING)?;
        required(&input.code, MISSING)?;
        // Compared verbatim: surrounding whitespace makes the code a mismatch.
        let code = input.code;

        // Checked in this order: absent, mismatch, expired.
        let stored = self
            .otps
            .find(&phone_number)
            .await?
            .ok_or(AuthServiceError::OtpNotFound)?;
        if stored.code != code {
            return Err(AuthServiceError::InvalidOtp);
        }
        if stored.is_expired_at(Utc::now()) {
            return Err(AuthServiceError::OtpExpired);
        }

        // The conditional delete is the commit point: of two concurrent
        // verifies only one removes the row.
        if !self.otps.consume(&phone_number, &code).await? {
            return Err(AuthServiceError::OtpNotFound);
        }

        let principal = Principal::Participant { phone_number };
        let (token, token_exp) = issue_token(&principal, self.session_ttl_secs, &self.jwt_secret)
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        Ok(VerifyOtpOutput { token, token_exp })
    }
}
