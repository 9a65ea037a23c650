use marathon_notify::{NotificationSender, Template, TicketDetails};

use crate::domain::repository::ParticipantRepository;
use crate::domain::types::Participant;
use crate::error::ParticipantsServiceError;
use crate::usecase::lookup::find;

/// The ticket confirmation message for `participant`.
pub fn ticket_template(participant: &Participant, pass_placeholder: &str) -> Template {
    Template::TicketConfirmation(TicketDetails::new(
        &participant.first_name,
        &participant.last_name,
        &participant.distance,
        participant.bib_num.as_deref(),
        participant.counter_no.as_deref(),
        participant.pass_link.as_deref(),
        pass_placeholder,
    ))
}

pub struct SendTicketUseCase<R, N>
where
    R: ParticipantRepository,
    N: NotificationSender,
{
    pub participants: R,
    pub notifier: N,
    pub pass_placeholder: String,
}

impl<R, N> SendTicketUseCase<R, N>
where
    R: ParticipantRepository,
    N: NotificationSender,
{
    /// Returns the provider's acknowledgement message.
    pub async fn execute(&self, raw_id: &str) -> Result<String, ParticipantsServiceError> {
        let participant = find(&self.participants, raw_id).await?;
        let template = ticket_template(&participant, &self.pass_placeholder);
        let outcome = self
            .notifier
            .send(&participant.phone_number, &template)
            .await;
        if !outcome.ok {
            return Err(ParticipantsServiceError::DeliveryFailed(outcome.message));
        }
        tracing::info!(participant_id = %participant.id, "ticket confirmation sent");
        Ok(outcome.message)
    }
}
