use axum::extract::State;
use axum::http::StatusCode;
use sea_orm::DatabaseConnection;

/// State that can hand out the service's database connection.
pub trait HasDatabase {
    fn database(&self) -> &DatabaseConnection;
}

/// Handler for `GET /healthz`. Liveness only.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz`. 503 until the database answers a ping.
pub async fn readyz<S>(State(state): State<S>) -> StatusCode
where
    S: HasDatabase + Clone + Send + Sync + 'static,
{
    match state.database().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            ::tracing::warn!(error = %e, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
