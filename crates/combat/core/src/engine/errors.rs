//! Encounter construction and restore errors.

use crate::error::{EngineError, ErrorSeverity};

/// Hard failures of encounter-level operations.
///
/// Unlike [`crate::action::ActionError`] these mean the caller handed the
/// encounter something it cannot work with.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncounterError {
    #[error("an encounter requires at least one participant")]
    NoParticipants,

    /// A snapshot names a combatant this encounter does not have.
    #[error("participant {0} is not part of this encounter")]
    UnknownParticipant(String),

    /// The snapshot's turn order or hazard list does not fit this encounter.
    #[error("snapshot does not match the encounter: {0}")]
    RosterMismatch(String),

    #[error("snapshot version {found} is not supported (expected {expected})")]
    VersionMismatch { expected: u32, found: u32 },

    /// Snapshot bytes could not be encoded or decoded.
    #[error("snapshot codec error: {0}")]
    Codec(String),
}

impl EngineError for EncounterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoParticipants => ErrorSeverity::Fatal,
            Self::UnknownParticipant(_) | Self::RosterMismatch(_) | Self::VersionMismatch { .. } => {
                ErrorSeverity::Validation
            }
            Self::Codec(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoParticipants => "ENCOUNTER_NO_PARTICIPANTS",
            Self::UnknownParticipant(_) => "ENCOUNTER_UNKNOWN_PARTICIPANT",
            Self::RosterMismatch(_) => "ENCOUNTER_ROSTER_MISMATCH",
            Self::VersionMismatch { .. } => "ENCOUNTER_VERSION_MISMATCH",
            Self::Codec(_) => "ENCOUNTER_CODEC",
        }
    }
}
