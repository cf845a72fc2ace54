use crate::env::{Catalog, StackMode, StatusApplication, StatusEffectDef};
use crate::rng::RandomSource;
use crate::state::{Combatant, StatusInstance};

/// Applies or updates a status on `target`.
///
/// Returns the resulting instance, or `None` when `effect_id` has no
/// definition (unknown ids are ignored, not errors).
///
/// A fresh application starts at the definition's duration with one stack.
/// Re-applying follows the definition's [`StackMode`]:
/// - `Add`: one more stack up to `max_stacks`, remaining becomes the longer
///   of the current remaining and the full duration
/// - `Refresh`: remaining resets to the full duration, stacks are clamped
///
/// A re-application that names a source replaces the recorded source.
pub fn apply_status(
    target: &mut Combatant,
    effect_id: &str,
    statuses: &Catalog<StatusEffectDef>,
    source_id: Option<&str>,
) -> Option<StatusInstance> {
    let def = statuses.get(effect_id)?;
    let cap = def.stack_cap();

    if let Some(current) = target.status_mut(effect_id) {
        match def.stack_mode {
            StackMode::Add => {
                current.stacks = (current.stacks + 1).min(cap);
                current.remaining = current.remaining.max(def.duration);
            }
            StackMode::Refresh => {
                current.stacks = current.stacks.clamp(1, cap);
                current.remaining = def.duration;
            }
        }
        if let Some(source) = source_id {
            current.source_id = Some(source.to_string());
        }
        return Some(current.clone());
    }

    let instance = StatusInstance::new(effect_id, source_id.map(str::to_string), def.duration);
    target.statuses.push(instance.clone());
    Some(instance)
}

/// Removes a status; true when one was present.
pub fn cleanse_status(target: &mut Combatant, effect_id: &str) -> bool {
    let removed = target.remove_status(effect_id).is_some();
    if removed {
        tracing::debug!(target = %target.id, effect = effect_id, "status cleansed");
    }
    removed
}

/// Rolls each on-hit application independently.
///
/// Every entry consumes one draw, in list order, whether or not its status
/// is known. An entry applies when the draw does not exceed its chance
/// (clamped to `[0, 1]`); a chance of zero never applies.
pub fn apply_on_hit(
    attacker_id: &str,
    target: &mut Combatant,
    applications: &[StatusApplication],
    statuses: &Catalog<StatusEffectDef>,
    rng: &mut dyn RandomSource,
) -> Vec<StatusInstance> {
    let mut applied = Vec::new();
    for application in applications {
        let chance = application.chance.clamp(0.0, 1.0);
        let roll = rng.randf();
        if chance <= 0.0 || roll > chance {
            continue;
        }
        if let Some(instance) = apply_status(target, &application.id, statuses, Some(attacker_id))
        {
            applied.push(instance);
        }
    }
    applied
}
