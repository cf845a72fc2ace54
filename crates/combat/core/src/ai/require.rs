//! AI rule requirement checks.

use crate::action::can_use_ability;
use crate::config::CombatConfig;
use crate::env::{AbilityDef, AiRequirement};
use crate::state::Combatant;

/// True when every set field of `require` holds.
///
/// `target` is the first selected target; a `target_hp_le` threshold fails
/// without one.
pub fn requirements_met(
    require: &AiRequirement,
    actor: &Combatant,
    target: Option<&Combatant>,
    ability: &AbilityDef,
    config: &CombatConfig,
) -> bool {
    if let Some(limit) = require.self_hp_le {
        if actor.hp() > limit {
            return false;
        }
    }
    if let Some(minimum) = require.self_mana_ge {
        if actor.mana() + config.resource_epsilon < minimum {
            return false;
        }
    }
    if let Some(limit) = require.target_hp_le {
        if !target.is_some_and(|t| t.hp() <= limit) {
            return false;
        }
    }
    if require.ability_ready && can_use_ability(actor, ability, config).is_err() {
        return false;
    }
    require
        .self_status_absent
        .iter()
        .all(|id| !actor.has_status(id))
        && require
            .self_status_present
            .iter()
            .all(|id| actor.has_status(id))
}
