//! Ticket sender configuration loaded from environment variables.
//!
//! Read after `dotenv::dotenv().ok()`, so a `.env` in the working directory
//! works the same as exported variables.

use serde::Deserialize;

use marathon_core::config::Config;
use marathon_notify::DovesoftConfig;
use marathon_notify::template::DEFAULT_PASS_PLACEHOLDER;

#[derive(Debug, Clone, Deserialize)]
pub struct TicketSenderConfig {
    /// `DATABASE_URL`
    pub database_url: String,
    /// `PASS_PLACEHOLDER_URL`, default [`DEFAULT_PASS_PLACEHOLDER`].
    #[serde(default = "default_pass_placeholder")]
    pub pass_placeholder_url: String,
}

fn default_pass_placeholder() -> String {
    DEFAULT_PASS_PLACEHOLDER.to_owned()
}

impl Config for TicketSenderConfig {}

/// Provider credentials. Only loaded with `--send`, so a dry run works
/// without them.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryConfig {
    #[serde(flatten)]
    pub dovesoft: DovesoftConfig,
}

impl Config for DeliveryConfig {}
