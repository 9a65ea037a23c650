//! Target selection and the send loop.

use std::collections::HashSet;
use std::time::Duration;

use marathon_notify::NotificationSender;
use marathon_notify::template::template_payload;
use marathon_participants::domain::repository::ParticipantRepository;
use marathon_participants::domain::types::Participant;
use marathon_participants::usecase::ticket::ticket_template;

use crate::reporter::Reporter;

/// Pause between provider calls.
pub const SEND_PAUSE: Duration = Duration::from_millis(200);

/// The phone digits to search for: trimmed, with a leading `+91` or `91`
/// country code removed. `None` when nothing is left.
pub fn phone_fragment(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("+91")
        .or_else(|| trimmed.strip_prefix("91"))
        .unwrap_or(trimmed);
    (!digits.is_empty()).then(|| digits.to_owned())
}

/// Every registration, or only those whose phone number contains one of the
/// given test numbers. A participant matched by two numbers is sent once.
pub async fn select_targets<R: ParticipantRepository>(
    participants: &R,
    test_numbers: &[String],
) -> anyhow::Result<Vec<Participant>> {
    if test_numbers.is_empty() {
        return Ok(participants.list_all().await?);
    }

    let mut groups = Vec::with_capacity(test_numbers.len());
    for raw in test_numbers {
        let Some(fragment) = phone_fragment(raw) else {
            tracing::warn!(number = %raw, "skipping blank test number");
            continue;
        };
        let found = participants.list_by_phone_containing(&fragment).await?;
        if found.is_empty() {
            println!("No participants found for {raw}");
        } else {
            println!("Found {} participant(s) for {raw}", found.len());
        }
        groups.push(found);
    }
    Ok(unique_by_id(groups))
}

fn unique_by_id(groups: Vec<Vec<Participant>>) -> Vec<Participant> {
    let mut seen = HashSet::new();
    groups
        .into_iter()
        .flatten()
        .filter(|p| seen.insert(p.id.clone()))
        .collect()
}

/// Sends (or, without a notifier, prints) one ticket confirmation per target.
pub struct Runner<N: NotificationSender> {
    notifier: Option<N>,
    pass_placeholder: String,
    pause: Duration,
}

impl<N: NotificationSender> Runner<N> {
    pub fn dry_run(pass_placeholder: impl Into<String>) -> Self {
        Self {
            notifier: None,
            pass_placeholder: pass_placeholder.into(),
            pause: Duration::ZERO,
        }
    }

    pub fn sending(notifier: N, pass_placeholder: impl Into<String>, pause: Duration) -> Self {
        Self {
            notifier: Some(notifier),
            pass_placeholder: pass_placeholder.into(),
            pause,
        }
    }

    pub async fn run(&self, targets: &[Participant], reporter: &mut Reporter) {
        for (i, participant) in targets.iter().enumerate() {
            let template = ticket_template(participant, &self.pass_placeholder);
            let Some(notifier) = &self.notifier else {
                let payload = template_payload(&participant.phone_number, &template);
                reporter.record_dry_run(participant, &payload);
                continue;
            };

            let outcome = notifier.send(&participant.phone_number, &template).await;
            reporter.record(participant, &outcome);
            if i + 1 < targets.len() && !self.pause.is_zero() {
                tokio::time::sleep(self.pause).await;
            }
        }
    }
}
