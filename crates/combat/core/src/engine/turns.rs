//! Initiative order and the cyclic turn pointer.

use std::cmp::Ordering;

use super::Encounter;
use crate::state::Combatant;

/// Participant indices sorted by DEX descending, then lowercase name, then id.
pub(crate) fn initiative_order(participants: &[Combatant]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..participants.len()).collect();
    order.sort_by(|&a, &b| {
        let (a, b) = (&participants[a], &participants[b]);
        b.stat("DEX")
            .partial_cmp(&a.stat("DEX"))
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.id.cmp(&b.id))
    });
    order
}

impl Encounter {
    /// Participant ids in initiative order.
    pub fn order_ids(&self) -> Vec<&str> {
        self.order
            .iter()
            .map(|&index| self.participants[index].id.as_str())
            .collect()
    }

    /// Current round; `0` until the first turn is taken.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Position in the initiative order of the next actor.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Id of the combatant [`Self::next_turn`] would return.
    pub fn peek_next(&self) -> &str {
        &self.participants[self.order[self.pointer]].id
    }

    /// Advances the pointer and returns the id of the actor whose turn it is.
    ///
    /// Dead combatants keep their slot; callers skip them. Wrapping back to
    /// the front of the order starts a new round, which also counts finite
    /// hazards down.
    pub fn next_turn(&mut self) -> String {
        if self.pointer == 0 {
            if self.round > 0 {
                self.environment.advance_round();
            }
            self.round += 1;
            tracing::debug!(round = self.round, "round started");
        }
        let index = self.order[self.pointer];
        self.pointer = (self.pointer + 1) % self.order.len();
        self.participants[index].id.clone()
    }
}
