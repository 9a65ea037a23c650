use axum::{
    Router,
    routing::{get, post},
};

use marathon_core::health::{healthz, readyz};
use marathon_core::middleware::with_observability;

use crate::handlers::{
    login::admin_login,
    me::me,
    otp::{send_register_otp, verify_otp},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz::<AppState>))
        // OTP
        .route("/api/auth/send-register-otp", post(send_register_otp))
        .route("/api/auth/verify-otp", post(verify_otp))
        // Tokens
        .route("/api/admin/login", post(admin_login))
        .route("/api/auth/me", get(me))
        .with_state(state);
    with_observability(router)
}
