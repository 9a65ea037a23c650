//! Dovesoft WhatsApp Business API client.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::template::{Template, template_payload};
use crate::{NotificationSender, SendOutcome};

pub const DEFAULT_API_URL: &str = "https://api.dovesoft.io//REST/directApi/message";

#[derive(Debug, Clone, Deserialize)]
pub struct DovesoftConfig {
    #[serde(rename = "dovesoft_api_url", default = "default_api_url")]
    pub api_url: String,
    #[serde(rename = "dovesoft_api_key")]
    pub api_key: String,
    #[serde(rename = "dovesoft_waba_number")]
    pub waba_number: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}

#[derive(Debug, Clone)]
pub struct DovesoftSender {
    client: Client,
    config: DovesoftConfig,
}

impl DovesoftSender {
    pub fn new(config: DovesoftConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

/// Pull `error.message` out of a provider error body when there is one.
fn provider_error_message(body: &Value) -> Option<String> {
    body.get("error")?.get("message")?.as_str().map(str::to_owned)
}

impl NotificationSender for DovesoftSender {
    async fn send(&self, phone_number: &str, template: &Template) -> SendOutcome {
        let res = self
            .client
            .post(&self.config.api_url)
            .header("wabaNumber", &self.config.waba_number)
            .header("Key", &self.config.api_key)
            .json(&template_payload(phone_number, template))
            .send()
            .await;

        let response = match res {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(template = template.name(), error = %e, "dovesoft request failed");
                return SendOutcome::failed(e.to_string(), None);
            }
        };

        let status = response.status();
        let body = response.json::<Value>().await.ok();

        if status.is_success() {
            tracing::debug!(template = template.name(), "dovesoft accepted message");
            return SendOutcome::sent(template.sent_message(), body);
        }

        let message = body
            .as_ref()
            .and_then(provider_error_message)
            .unwrap_or_else(|| format!("provider returned {status}"));
        tracing::warn!(
            template = template.name(),
            status = status.as_u16(),
            message = %message,
            "dovesoft rejected message"
        );
        SendOutcome::failed(message, body)
    }
}
