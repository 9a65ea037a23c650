use serde::Deserialize;

use marathon_core::config::Config;
use marathon_notify::DovesoftConfig;
use marathon_notify::template::DEFAULT_PASS_PLACEHOLDER;

/// Participants service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ParticipantsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret the auth service signs tokens with.
    pub jwt_secret: String,
    /// TCP port to listen on. Env var: `PARTICIPANTS_PORT`.
    #[serde(default = "default_port")]
    pub participants_port: u16,
    /// Pass image linked in ticket messages when a participant has none.
    #[serde(default = "default_pass_placeholder")]
    pub pass_placeholder_url: String,
    #[serde(flatten)]
    pub dovesoft: DovesoftConfig,
}

fn default_port() -> u16 {
    3113
}

fn default_pass_placeholder() -> String {
    DEFAULT_PASS_PLACEHOLDER.to_owned()
}

impl Config for ParticipantsConfig {}
