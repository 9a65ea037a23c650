use axum::{Json, extract::State};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use marathon_core::error::Success;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::login::{AdminLoginInput, AdminLoginUseCase};

#[derive(Deserialize)]
pub struct AdminLoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginResponse {
    pub token: String,
    pub expires_at: u64,
}

// ── POST /api/admin/login ────────────────────────────────────────────────────

pub async fn admin_login(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<AdminLoginRequest>, AuthServiceError>,
) -> Result<Success<AdminLoginResponse>, AuthServiceError> {
    let usecase = AdminLoginUseCase {
        admins: state.admin_repo(),
        jwt_secret: state.jwt_secret.clone(),
        admin_ttl_secs: state.admin_token_ttl_secs,
    };
    let out = usecase
        .execute(AdminLoginInput {
            username: body.username,
            password: body.password,
        })
        .await?;
    Ok(Success::new(AdminLoginResponse {
        token: out.token,
        expires_at: out.token_exp,
    }))
}
