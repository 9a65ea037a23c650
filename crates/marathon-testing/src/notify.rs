//! In-memory [`NotificationSender`] that records every send.

use std::sync::{Arc, Mutex};

use marathon_notify::{NotificationSender, SendOutcome, Template};

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(String, Template)>>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose provider rejects every message (still recorded).
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Shared handle to the recorded `(phone_number, template)` pairs.
    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, Template)>>> {
        Arc::clone(&self.sent)
    }
}

impl NotificationSender for RecordingNotifier {
    async fn send(&self, phone_number: &str, template: &Template) -> SendOutcome {
        self.sent
            .lock()
            .expect("notifier lock")
            .push((phone_number.to_owned(), template.clone()));
        if self.fail {
            SendOutcome::failed("provider rejected message", None)
        } else {
            SendOutcome::sent(template.sent_message(), None)
        }
    }
}
