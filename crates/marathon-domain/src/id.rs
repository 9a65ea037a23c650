//! Newtype wrappers for domain identifiers.

use std::fmt;
use std::str::FromStr;

use rand::RngExt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Alphabet for participant ids (digits, upper, lower).
const PARTICIPANT_ID_CHARSET: &[u8] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Participant id length in characters.
pub const PARTICIPANT_ID_LEN: usize = 6;

/// Identifies a registered participant. Printed on the pass as a QR payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Draw a fresh random id. Uniqueness is the caller's job (check the store, retry).
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let id = (0..PARTICIPANT_ID_LEN)
            .map(|_| {
                PARTICIPANT_ID_CHARSET[rng.random_range(0..PARTICIPANT_ID_CHARSET.len())] as char
            })
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("participant id must be {PARTICIPANT_ID_LEN} alphanumeric characters")]
pub struct InvalidParticipantId;

impl FromStr for ParticipantId {
    type Err = InvalidParticipantId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == PARTICIPANT_ID_LEN && s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Ok(Self(s.to_owned()))
        } else {
            Err(InvalidParticipantId)
        }
    }
}

/// Identifies an admin operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdminId(pub Uuid);

impl fmt::Display for AdminId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AdminId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Uuid> for AdminId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
