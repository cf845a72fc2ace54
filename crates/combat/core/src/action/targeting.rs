//! Targeting spec resolution.

use super::ActionError;
use crate::effect::taunt_source;
use crate::env::{Catalog, StatusEffectDef, TargetingSpec};
use crate::rng::RandomSource;
use crate::state::Combatant;
use crate::state::roster::{living_allies, living_enemies};

/// Validated targets, possibly still awaiting a random pick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetSelection {
    /// Participant indices, in resolution order.
    Fixed(Vec<usize>),
    /// One of these indices, picked with a single draw.
    RandomAmong(Vec<usize>),
}

impl TargetSelection {
    /// Resolves the selection to participant indices.
    ///
    /// Only [`TargetSelection::RandomAmong`] draws.
    pub fn finish(self, rng: &mut dyn RandomSource) -> Result<Vec<usize>, ActionError> {
        match self {
            Self::Fixed(targets) => Ok(targets),
            Self::RandomAmong(candidates) => {
                let pick = rng
                    .choose_index(candidates.len())
                    .map_err(|_| ActionError::NoValidTarget)?;
                Ok(vec![candidates[pick]])
            }
        }
    }
}

/// Every participant the spec could legally target, in participant order.
///
/// - `self`: the actor
/// - `single_enemy`, `random_enemy`, `all_enemies`: living enemies
/// - `ally_lowest_hp`: the living ally (actor included) with the lowest hp,
///   first in participant order on ties
pub fn possible_targets(
    participants: &[Combatant],
    actor: usize,
    spec: TargetingSpec,
) -> Result<Vec<usize>, ActionError> {
    let team = participants[actor].team.as_str();
    match spec {
        TargetingSpec::SelfOnly => Ok(vec![actor]),
        TargetingSpec::SingleEnemy | TargetingSpec::RandomEnemy | TargetingSpec::AllEnemies => {
            Ok(living_enemies(participants, team))
        }
        TargetingSpec::AllyLowestHp => {
            let mut lowest: Option<usize> = None;
            for index in living_allies(participants, team) {
                match lowest {
                    Some(best) if participants[best].hp() <= participants[index].hp() => {}
                    _ => lowest = Some(index),
                }
            }
            Ok(lowest.into_iter().collect())
        }
        TargetingSpec::Unsupported => Err(ActionError::UnsupportedTargeting),
    }
}

/// Validates requested targets against the spec without drawing.
///
/// For single-target specs only the first requested id is used; with none
/// requested the first possible target is chosen (`random_enemy` defers to a
/// random pick instead). `all_enemies` ignores requested ids. A taunted
/// actor using `single_enemy` or `random_enemy` is redirected to the living
/// taunt source whatever was requested.
pub fn select_targets(
    participants: &[Combatant],
    actor: usize,
    spec: TargetingSpec,
    requested: &[String],
    statuses: &Catalog<StatusEffectDef>,
) -> Result<TargetSelection, ActionError> {
    let possible = possible_targets(participants, actor, spec)?;
    if possible.is_empty() {
        return Err(ActionError::NoValidTarget);
    }

    if matches!(spec, TargetingSpec::SingleEnemy | TargetingSpec::RandomEnemy) {
        if let Some(forced) = taunt_source(&participants[actor], statuses, participants) {
            tracing::debug!(
                actor = %participants[actor].id,
                forced = %participants[forced].id,
                "taunt redirects target"
            );
            return Ok(TargetSelection::Fixed(vec![forced]));
        }
    }

    if spec == TargetingSpec::AllEnemies {
        return Ok(TargetSelection::Fixed(possible));
    }

    match requested.first() {
        Some(id) => possible
            .iter()
            .copied()
            .find(|&index| participants[index].id == *id)
            .map(|index| TargetSelection::Fixed(vec![index]))
            .ok_or_else(|| ActionError::InvalidTarget(id.clone())),
        None if spec == TargetingSpec::RandomEnemy => Ok(TargetSelection::RandomAmong(possible)),
        None => Ok(TargetSelection::Fixed(vec![possible[0]])),
    }
}
