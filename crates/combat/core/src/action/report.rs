//! Successful action results.

use crate::event::CombatEvent;

/// What an executed ability or item did.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionReport {
    /// Ids of the resolved targets, in resolution order.
    pub targets: Vec<String>,
    pub events: Vec<CombatEvent>,
}

impl ActionReport {
    pub fn hits(&self) -> impl Iterator<Item = &CombatEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, CombatEvent::Hit { .. }))
    }

    pub fn misses(&self) -> impl Iterator<Item = &CombatEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, CombatEvent::Miss { .. }))
    }
}

/// What triggered an attack roll, stamped onto its events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionSource {
    Ability(String),
    Item(String),
}

impl ActionSource {
    pub(crate) fn ability_id(&self) -> Option<String> {
        match self {
            Self::Ability(id) => Some(id.clone()),
            Self::Item(_) => None,
        }
    }

    pub(crate) fn item_id(&self) -> Option<String> {
        match self {
            Self::Ability(_) => None,
            Self::Item(id) => Some(id.clone()),
        }
    }
}
