use serde::Deserialize;

use marathon_core::config::Config;
use marathon_notify::DovesoftConfig;

/// Auth service configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing admin and session tokens. Shared with the
    /// participants service, which only validates.
    pub jwt_secret: String,
    /// TCP port to listen on. Env var: `AUTH_PORT`.
    #[serde(default = "default_port")]
    pub auth_port: u16,
    #[serde(default = "default_admin_ttl")]
    pub admin_token_ttl_secs: u64,
    #[serde(default = "default_session_ttl")]
    pub session_token_ttl_secs: u64,
    #[serde(flatten)]
    pub dovesoft: DovesoftConfig,
}

fn default_port() -> u16 {
    3112
}

/// 12 hours.
fn default_admin_ttl() -> u64 {
    12 * 60 * 60
}

/// 24 hours.
fn default_session_ttl() -> u64 {
    24 * 60 * 60
}

impl Config for AuthConfig {}
