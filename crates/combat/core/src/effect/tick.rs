use crate::combat::round_tenth;
use crate::config::CombatConfig;
use crate::env::{Catalog, StatusEffectDef};
use crate::event::CombatEvent;
use crate::formula::{FormulaContext, evaluate_or};
use crate::state::Combatant;

/// Damage type reported for ticks whose status names none.
const UNTYPED_DAMAGE: &str = "damage";

/// Formula variables for status ticks and hazards: the victim's own
/// `STR`, `DEX`, `INT` and `STA`.
pub fn tick_context(owner: &Combatant) -> FormulaContext {
    FormulaContext::new()
        .with("STR", owner.stat("STR"))
        .with("DEX", owner.stat("DEX"))
        .with("INT", owner.stat("INT"))
        .with("STA", owner.stat("STA"))
}

/// Runs the start-of-turn tick for every status on `actor`.
///
/// Per status, in list order: evaluate `per_tick` on the owner's stats,
/// multiply by stacks, apply the owner's resistance to the status damage
/// type and round to one decimal. A positive amount is subtracted from hp
/// and reported as a `dot` event. Then `remaining` is decremented, whether
/// or not damage was dealt, and the status is dropped at zero. Instances
/// with no definition in `statuses` are dropped without ticking.
pub fn tick_start_of_turn(
    actor: &mut Combatant,
    statuses: &Catalog<StatusEffectDef>,
    config: &CombatConfig,
) -> Vec<CombatEvent> {
    let mut events = Vec::new();
    if actor.statuses.is_empty() {
        return events;
    }

    let ctx = tick_context(actor);
    let mut damage = Vec::new();
    for instance in &actor.statuses {
        let Some(def) = statuses.get(&instance.id) else {
            continue;
        };
        let Some(per_tick) = def.per_tick.as_deref() else {
            continue;
        };
        let base = evaluate_or(per_tick, &ctx, 0.0).max(0.0) * f64::from(instance.stacks);
        let resist = def
            .damage_type
            .as_deref()
            .map(|dtype| actor.resist_for(dtype))
            .unwrap_or(0.0);
        let amount = round_tenth(base * (1.0 - config.clamp_resist(resist)));
        if amount > 0.0 {
            damage.push((
                instance.id.clone(),
                amount,
                def.damage_type
                    .clone()
                    .unwrap_or_else(|| UNTYPED_DAMAGE.to_string()),
            ));
        }
    }

    for (effect_id, amount, dtype) in damage {
        actor.take_damage(amount);
        events.push(CombatEvent::Dot {
            target_id: actor.id.clone(),
            effect_id,
            amount,
            dtype,
        });
    }

    for instance in &mut actor.statuses {
        instance.remaining = instance.remaining.saturating_sub(1);
    }
    let owner = actor.id.clone();
    actor.statuses.retain(|instance| {
        if !statuses.contains(&instance.id) {
            tracing::debug!(owner = %owner, effect = %instance.id, "status has no definition, dropped");
            false
        } else if instance.is_expired() {
            tracing::debug!(owner = %owner, effect = %instance.id, "status expired");
            false
        } else {
            true
        }
    });

    events
}
