use chrono::Utc;
use uuid::Uuid;

use marathon_auth_types::token::{Principal, issue_token};
use marathon_domain::id::AdminId;

use crate::domain::repository::AdminRepository;
use crate::domain::types::{ADMIN_BCRYPT_COST, Admin};
use crate::error::AuthServiceError;

// ── AdminLogin ───────────────────────────────────────────────────────────────

pub struct AdminLoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct AdminLoginOutput {
    pub token: String,
    pub token_exp: u64,
}

pub struct AdminLoginUseCase<A: AdminRepository> {
    pub admins: A,
    pub jwt_secret: String,
    pub admin_ttl_secs: u64,
}

impl<A: AdminRepository> AdminLoginUseCase<A> {
    /// Unknown username and wrong password fail the same way.
    pub async fn execute(&self, input: AdminLoginInput) -> Result<AdminLoginOutput, AuthServiceError> {
        if input.username.trim().is_empty() || input.password.is_empty() {
            return Err(AuthServiceError::MissingField(
                "Username and password are required",
            ));
        }

        let admin = self
            .admins
            .find_by_username(input.username.trim())
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        let valid = bcrypt::verify(&input.password, &admin.password_hash)
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        if !valid {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let principal = Principal::Admin {
            id: AdminId(admin.id),
            username: admin.username,
        };
        let (token, token_exp) = issue_token(&principal, self.admin_ttl_secs, &self.jwt_secret)
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        Ok(AdminLoginOutput { token, token_exp })
    }
}

// ── ProvisionAdmin ───────────────────────────────────────────────────────────

pub struct ProvisionAdminInput {
    pub username: String,
    pub password: String,
}

pub struct ProvisionAdminUseCase<A: AdminRepository> {
    pub admins: A,
}

impl<A: AdminRepository> ProvisionAdminUseCase<A> {
    /// Create the admin, or reset the password of an existing one.
    pub async fn execute(&self, input: ProvisionAdminInput) -> Result<(), AuthServiceError> {
        let username = input.username.trim();
        if username.is_empty() || input.password.is_empty() {
            return Err(AuthServiceError::MissingField(
                "Username and password are required",
            ));
        }
        let password_hash = bcrypt::hash(&input.password, ADMIN_BCRYPT_COST)
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        let admin = Admin {
            id: Uuid::new_v4(),
            username: username.to_owned(),
            password_hash,
            created_at: Utc::now(),
        };
        self.admins.upsert(&admin).await
    }
}
