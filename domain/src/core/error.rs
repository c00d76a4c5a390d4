//! Domain error types

use crate::game::participant::ParticipantId;
use thiserror::Error;

/// Invariant violations raised by domain operations.
///
/// None of these are expected during a well-formed game: each one means the
/// single-writer discipline around the registry or game state was broken.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    #[error("Participant {0} is already dead")]
    AlreadyDead(ParticipantId),

    #[error("Participant {0} is already registered")]
    DuplicateParticipant(ParticipantId),

    #[error("Participant {participant} is not a member of channel '{channel}'")]
    NotAMember {
        participant: ParticipantId,
        channel: String,
    },

    #[error("Channel '{0}' is closed")]
    ChannelClosed(String),

    #[error("Game outcome already decided: {0}")]
    OutcomeAlreadySet(String),
}

impl DomainError {
    /// The participant this error refers to, if any
    pub fn participant(&self) -> Option<&ParticipantId> {
        match self {
            DomainError::UnknownParticipant(id)
            | DomainError::AlreadyDead(id)
            | DomainError::DuplicateParticipant(id) => Some(id),
            DomainError::NotAMember { participant, .. } => Some(participant),
            DomainError::ChannelClosed(_) | DomainError::OutcomeAlreadySet(_) => None,
        }
    }
}
