//! Snapshot and restore.
//!
//! A snapshot captures everything that influences future draws and turns:
//! generator state, initiative order, pointer, round, every participant's
//! mutable fields, the threat table and hazard countdowns. The event log is
//! history, not state, and is left out.

use super::{Encounter, EncounterError};
use crate::rng::RngState;
use crate::state::Combatant;
use crate::state::roster::index_of;
use crate::threat::ThreatTable;

/// Current snapshot layout version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Opaque-to-callers capture of an [`Encounter`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterSnapshot {
    pub version: u32,
    pub rng: RngState,
    /// Participant ids in initiative order.
    pub order: Vec<String>,
    pub pointer: usize,
    pub round: u32,
    pub participants: Vec<Combatant>,
    pub threat: ThreatTable,
    /// Remaining-round counters of the encounter's hazards, in definition order.
    pub hazard_rounds: Vec<u32>,
}

#[cfg(feature = "serde")]
impl EncounterSnapshot {
    /// Encodes the snapshot with bincode.
    ///
    /// # Errors
    ///
    /// [`EncounterError::Codec`] when serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncounterError> {
        bincode::serialize(self).map_err(|e| EncounterError::Codec(e.to_string()))
    }

    /// Decodes a snapshot produced by [`Self::to_bytes`].
    ///
    /// # Errors
    ///
    /// [`EncounterError::Codec`] for malformed bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EncounterError> {
        bincode::deserialize(bytes).map_err(|e| EncounterError::Codec(e.to_string()))
    }
}

impl Encounter {
    /// Captures the encounter's full mutable state.
    pub fn snapshot(&self) -> EncounterSnapshot {
        EncounterSnapshot {
            version: SNAPSHOT_VERSION,
            rng: self.rng.state(),
            order: self.order_ids().into_iter().map(str::to_string).collect(),
            pointer: self.pointer,
            round: self.round,
            participants: self.participants.clone(),
            threat: self.threat.clone(),
            hazard_rounds: self.environment.remaining_rounds(),
        }
    }

    /// Applies a snapshot onto this encounter's participants, matched by id.
    ///
    /// Identity fields (id, name, team) are never overwritten; they must
    /// already match. Everything is validated before anything changes, so a
    /// failed restore leaves the encounter untouched. The event log is kept.
    ///
    /// # Errors
    ///
    /// - [`EncounterError::VersionMismatch`] for another snapshot layout
    /// - [`EncounterError::UnknownParticipant`] when an id is not in this encounter
    /// - [`EncounterError::RosterMismatch`] when the order, pointer or hazard
    ///   counters do not fit
    pub fn restore(&mut self, snapshot: &EncounterSnapshot) -> Result<(), EncounterError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(EncounterError::VersionMismatch {
                expected: SNAPSHOT_VERSION,
                found: snapshot.version,
            });
        }
        if snapshot.order.len() != self.participants.len() {
            return Err(EncounterError::RosterMismatch(format!(
                "order has {} entries, encounter has {} participants",
                snapshot.order.len(),
                self.participants.len()
            )));
        }
        if snapshot.pointer >= snapshot.order.len() {
            return Err(EncounterError::RosterMismatch(format!(
                "pointer {} out of range",
                snapshot.pointer
            )));
        }
        if snapshot.hazard_rounds.len() != self.environment.len() {
            return Err(EncounterError::RosterMismatch(format!(
                "{} hazard counters for {} hazards",
                snapshot.hazard_rounds.len(),
                self.environment.len()
            )));
        }

        let order = snapshot
            .order
            .iter()
            .map(|id| {
                index_of(&self.participants, id)
                    .ok_or_else(|| EncounterError::UnknownParticipant(id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut seen = order.clone();
        seen.sort_unstable();
        seen.dedup();
        if seen.len() != order.len() {
            return Err(EncounterError::RosterMismatch(
                "order lists a participant twice".to_string(),
            ));
        }

        let targets = snapshot
            .participants
            .iter()
            .map(|saved| {
                index_of(&self.participants, &saved.id)
                    .ok_or_else(|| EncounterError::UnknownParticipant(saved.id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (saved, index) in snapshot.participants.iter().zip(targets) {
            self.participants[index].restore_from(saved);
        }
        self.rng.set_state(snapshot.rng);
        self.order = order;
        self.pointer = snapshot.pointer;
        self.round = snapshot.round;
        self.threat = snapshot.threat.clone();
        self.environment
            .restore_remaining_rounds(&snapshot.hazard_rounds);

        tracing::debug!(round = self.round, pointer = self.pointer, "encounter restored");
        Ok(())
    }

    /// SHA-256 over the bincode encoding of [`Self::snapshot`].
    ///
    /// Two encounters are in the same state exactly when their digests match.
    ///
    /// # Errors
    ///
    /// [`EncounterError::Codec`] when the snapshot cannot be encoded.
    #[cfg(feature = "serde")]
    pub fn state_digest(&self) -> Result<[u8; 32], EncounterError> {
        use sha2::{Digest, Sha256};

        let bytes = self.snapshot().to_bytes()?;
        Ok(Sha256::digest(&bytes).into())
    }
}
