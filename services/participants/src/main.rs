use sea_orm::Database;
use tracing::info;

use marathon_core::config::Config;
use marathon_core::tracing::init_tracing;
use marathon_notify::DovesoftSender;
use marathon_participants::config::ParticipantsConfig;
use marathon_participants::router::build_router;
use marathon_participants::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing("info");

    let config = ParticipantsConfig::from_env()
        .expect("failed to load participants config from environment");

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        notifier: DovesoftSender::new(config.dovesoft.clone()),
        jwt_secret: config.jwt_secret.clone(),
        pass_placeholder_url: config.pass_placeholder_url.clone(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.participants_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("participants service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
