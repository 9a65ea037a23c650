pub mod admin;
pub mod lookup;
pub mod registration;
pub mod stats;
pub mod ticket;

use marathon_domain::id::ParticipantId;

/// Parse an id taken from a URL. Anything that cannot be a participant id
/// simply names no participant.
pub(crate) fn parse_id(raw: &str) -> Option<ParticipantId> {
    raw.trim().parse().ok()
}
