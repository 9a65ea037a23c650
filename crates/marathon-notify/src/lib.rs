//! Outbound WhatsApp template messages.
//!
//! A send either reaches the provider's API or it does not; `ok` reflects only
//! whether the provider accepted the request. Nothing here retries.

#![allow(async_fn_in_trait)]

pub mod dovesoft;
pub mod template;

pub use dovesoft::{DovesoftConfig, DovesoftSender};
pub use template::{Template, TicketDetails};

/// Result of one send attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct SendOutcome {
    pub ok: bool,
    pub message: String,
    pub raw_response: Option<serde_json::Value>,
}

impl SendOutcome {
    pub fn sent(message: impl Into<String>, raw_response: Option<serde_json::Value>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            raw_response,
        }
    }

    pub fn failed(message: impl Into<String>, raw_response: Option<serde_json::Value>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            raw_response,
        }
    }
}

/// Delivers a [`Template`] to a phone number.
pub trait NotificationSender: Send + Sync {
    async fn send(&self, phone_number: &str, template: &Template) -> SendOutcome;
}
