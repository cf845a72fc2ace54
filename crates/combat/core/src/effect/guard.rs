use crate::combat::round_tenth;
use crate::env::{Catalog, StatusEffectDef};
use crate::event::CombatEvent;
use crate::state::Combatant;

/// Lets a guard status on `target` absorb part of an incoming hit.
///
/// The first guard status in the target's list is consumed by any hit with
/// a positive amount, whoever the attacker is. Returns the reduced amount
/// and, when a guard fired, the `guard_block` event to emit before the hit.
pub fn modify_incoming_damage(
    target: &mut Combatant,
    amount: f64,
    statuses: &Catalog<StatusEffectDef>,
    attacker_id: Option<&str>,
) -> (f64, Option<CombatEvent>) {
    if amount <= 0.0 {
        return (amount, None);
    }

    let guard = target.statuses.iter().find_map(|instance| {
        statuses
            .get(&instance.id)
            .and_then(|def| def.guard)
            .map(|spec| (instance.id.clone(), spec))
    });
    let Some((effect_id, spec)) = guard else {
        return (amount, None);
    };

    let reduced_amount = round_tenth(amount * (1.0 - spec.reduction.clamp(0.0, 1.0)));
    let reduced = round_tenth(amount - reduced_amount);
    target.remove_status(&effect_id);
    tracing::debug!(target = %target.id, effect = %effect_id, reduced, "guard consumed");

    let event = CombatEvent::GuardBlock {
        actor_id: attacker_id.map(str::to_string),
        target_id: target.id.clone(),
        effect_id,
        reduced,
    };
    (reduced_amount, Some(event))
}

/// Index of the combatant that `actor` is forced to attack, if any.
///
/// The first taunt status whose source is a living enemy wins. Taunts from
/// dead or unknown sources are ignored.
pub fn taunt_source(
    actor: &Combatant,
    statuses: &Catalog<StatusEffectDef>,
    participants: &[Combatant],
) -> Option<usize> {
    actor
        .statuses
        .iter()
        .filter(|instance| statuses.get(&instance.id).is_some_and(|def| def.taunt))
        .filter_map(|instance| instance.source_id.as_deref())
        .find_map(|source| {
            participants
                .iter()
                .position(|c| c.id == source && c.is_alive() && c.team != actor.team)
        })
}
