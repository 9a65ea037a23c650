use axum::{
    Router,
    routing::{get, patch, post},
};

use marathon_core::health::{healthz, readyz};
use marathon_core::middleware::with_observability;

use crate::handlers::{
    admin::{
        check_in_participant, check_participant, dashboard_stats, get_participant,
        list_participants, log_scan, related_participants, send_ticket_confirmation,
        update_participant,
    },
    public::{my_passes, public_participant},
    registration::{check_duplicate, register},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz::<AppState>))
        // Public
        .route("/api/register", post(register))
        .route("/api/check-duplicate", post(check_duplicate))
        .route("/api/public/user/{id}", get(public_participant))
        // Participant session
        .route("/api/user/passes", post(my_passes))
        // Admin
        .route("/api/admin/users", get(list_participants))
        .route(
            "/api/admin/user/{id}",
            get(get_participant).put(update_participant),
        )
        .route("/api/admin/user/{id}/check-in", patch(check_in_participant))
        .route("/api/admin/user/{id}/related", get(related_participants))
        .route(
            "/api/admin/user/{id}/ticket-confirmation",
            post(send_ticket_confirmation),
        )
        .route("/api/admin/check-user/{id}", get(check_participant))
        .route("/api/admin/log-scan", post(log_scan))
        .route("/api/admin/dashboard-stats", get(dashboard_stats))
        .with_state(state);
    with_observability(router)
}
