//! Queries over the participant list.
//!
//! Participants are never removed from an encounter, so every "living" query
//! filters on `hp > 0` and preserves participant order.

use std::collections::BTreeSet;

use super::Combatant;

/// Position of a combatant by id.
pub fn index_of(participants: &[Combatant], id: &str) -> Option<usize> {
    participants.iter().position(|c| c.id == id)
}

/// Indices of living combatants on a different team than `team`.
pub fn living_enemies(participants: &[Combatant], team: &str) -> Vec<usize> {
    participants
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_alive() && c.team != team)
        .map(|(i, _)| i)
        .collect()
}

/// Indices of living combatants on `team`.
pub fn living_allies(participants: &[Combatant], team: &str) -> Vec<usize> {
    participants
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_alive() && c.team == team)
        .map(|(i, _)| i)
        .collect()
}

/// Teams that still have at least one living member.
pub fn living_teams(participants: &[Combatant]) -> BTreeSet<&str> {
    participants
        .iter()
        .filter(|c| c.is_alive())
        .map(|c| c.team.as_str())
        .collect()
}
