use sea_orm::Database;
use tracing::info;

use marathon_auth::config::AuthConfig;
use marathon_auth::router::build_router;
use marathon_auth::state::AppState;
use marathon_core::config::Config;
use marathon_core::tracing::init_tracing;
use marathon_notify::DovesoftSender;

#[tokio::main]
async fn main() {
    init_tracing("info");

    let config = AuthConfig::from_env().expect("failed to load auth config from environment");

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        notifier: DovesoftSender::new(config.dovesoft.clone()),
        jwt_secret: config.jwt_secret.clone(),
        admin_token_ttl_secs: config.admin_token_ttl_secs,
        session_token_ttl_secs: config.session_token_ttl_secs,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("auth service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
