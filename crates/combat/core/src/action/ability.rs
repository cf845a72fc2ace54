//! Ability gating and execution.

use super::targeting::select_targets;
use super::{ActionError, ActionReport, ActionSource};
use crate::combat::resolve_attack;
use crate::config::CombatConfig;
use crate::effect::{apply_on_hit, modify_incoming_damage};
use crate::env::{AbilityDef, AbilityKind, CombatEnv};
use crate::event::CombatEvent;
use crate::rng::RandomSource;
use crate::state::Combatant;
use crate::state::roster::index_of;

/// Checks cooldown and resource costs without mutating anything.
///
/// Any nonzero cooldown entry blocks. Costs are checked in resource-name
/// order; the first unaffordable one is reported.
pub fn can_use_ability(
    actor: &Combatant,
    ability: &AbilityDef,
    config: &CombatConfig,
) -> Result<(), ActionError> {
    if actor.cooldown(&ability.id) > 0 {
        return Err(ActionError::OnCooldown(ability.id.clone()));
    }
    for (resource, cost) in &ability.resource_cost {
        if actor.resource(resource) + config.resource_epsilon < *cost {
            return Err(ActionError::InsufficientResource(resource.clone()));
        }
    }
    Ok(())
}

/// Executes an ability for `actor_id`.
///
/// Gating is atomic: a rejected attempt leaves every participant and the
/// random source untouched. On success costs are deducted, the cooldown is
/// set, then each target is resolved in order.
///
/// # Errors
///
/// See [`ActionError`] for the rejection reasons.
pub fn execute_ability(
    participants: &mut [Combatant],
    actor_id: &str,
    ability: &AbilityDef,
    target_ids: &[String],
    env: &CombatEnv,
    config: &CombatConfig,
    rng: &mut dyn RandomSource,
) -> Result<ActionReport, ActionError> {
    let actor = index_of(participants, actor_id)
        .ok_or_else(|| ActionError::UnknownActor(actor_id.to_string()))?;

    let selection = select_targets(
        participants,
        actor,
        ability.targeting,
        target_ids,
        &env.statuses,
    )?;
    can_use_ability(&participants[actor], ability, config)?;
    let targets = selection.finish(rng)?;

    let user = &mut participants[actor];
    for (resource, cost) in &ability.resource_cost {
        user.spend_resource(resource, *cost);
    }
    if ability.cooldown > 0 {
        user.set_cooldown(ability.id.clone(), ability.cooldown);
    }

    tracing::debug!(
        actor = actor_id,
        ability = %ability.id,
        targets = targets.len(),
        "executing ability"
    );

    let source = ActionSource::Ability(ability.id.clone());
    let events = match ability.kind {
        AbilityKind::Attack => {
            resolve_targets(participants, actor, ability, &targets, &source, env, config, rng)
        }
        AbilityKind::Support => support_targets(participants, actor, ability, &targets, env, rng),
    };

    Ok(ActionReport {
        targets: targets
            .iter()
            .map(|&index| participants[index].id.clone())
            .collect(),
        events,
    })
}

/// Rolls an attack against each living target and applies the outcome.
///
/// Per target: resolution, guard modification, hp loss, then on-hit
/// statuses. Shared by attack abilities and throwable items.
#[allow(clippy::too_many_arguments)]
pub(crate) fn resolve_targets(
    participants: &mut [Combatant],
    actor: usize,
    ability: &AbilityDef,
    targets: &[usize],
    source: &ActionSource,
    env: &CombatEnv,
    config: &CombatConfig,
    rng: &mut dyn RandomSource,
) -> Vec<CombatEvent> {
    let actor_id = participants[actor].id.clone();
    let mut events = Vec::new();

    for &index in targets {
        if !participants[index].is_alive() {
            continue;
        }
        let result = resolve_attack(
            &participants[actor],
            &participants[index],
            ability,
            &env.body_parts,
            config,
            rng,
        );
        let target = &mut participants[index];

        if !result.hit {
            events.push(CombatEvent::Miss {
                actor_id: actor_id.clone(),
                target_id: target.id.clone(),
                ability_id: source.ability_id(),
                item_id: source.item_id(),
            });
            continue;
        }

        let (amount, block) =
            modify_incoming_damage(target, result.amount, &env.statuses, Some(&actor_id));
        events.extend(block);
        target.take_damage(amount);
        events.push(CombatEvent::Hit {
            actor_id: actor_id.clone(),
            target_id: target.id.clone(),
            ability_id: source.ability_id(),
            item_id: source.item_id(),
            amount,
            dtype: result.damage_type,
            crit: result.crit,
            body_part: result.body_part,
        });

        for instance in apply_on_hit(&actor_id, target, &ability.on_hit, &env.statuses, rng) {
            events.push(CombatEvent::Effect {
                actor_id: Some(actor_id.clone()),
                target_id: target.id.clone(),
                effect_id: instance.id,
                ability_id: source.ability_id(),
                item_id: source.item_id(),
            });
        }
    }
    events
}

/// Applies a support ability's statuses to each living target.
fn support_targets(
    participants: &mut [Combatant],
    actor: usize,
    ability: &AbilityDef,
    targets: &[usize],
    env: &CombatEnv,
    rng: &mut dyn RandomSource,
) -> Vec<CombatEvent> {
    let actor_id = participants[actor].id.clone();
    let mut events = Vec::new();

    for &index in targets {
        let target = &mut participants[index];
        if !target.is_alive() {
            continue;
        }
        for instance in apply_on_hit(&actor_id, target, &ability.on_hit, &env.statuses, rng) {
            events.push(CombatEvent::Effect {
                actor_id: Some(actor_id.clone()),
                target_id: target.id.clone(),
                effect_id: instance.id,
                ability_id: Some(ability.id.clone()),
                item_id: None,
            });
        }
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{CritSpec, StatusEffectDef, TargetingSpec};
    use crate::rng::ScriptedRandom;

    fn env() -> CombatEnv {
        CombatEnv::new()
            .with_status(StatusEffectDef::new("burning", 3).with_tick("2", "fire"))
            .with_status(StatusEffectDef::new("guarding", 1).with_guard(0.5))
    }

    fn duo() -> Vec<Combatant> {
        vec![
            Combatant::new("A", "Aria")
                .with_team("alpha")
                .with_stat("ATT", 8.0)
                .with_stat("DEX", 8.0)
                .with_stat("WPN", 3.0)
                .with_stat("INT", 10.0)
                .with_hp(30.0)
                .with_mana(6.0),
            Combatant::new("B", "Belor")
                .with_team("beta")
                .with_stat("DEX", 6.0)
                .with_stat("ARM", 2.0)
                .with_hp(28.0),
        ]
    }

    fn firebolt() -> AbilityDef {
        AbilityDef::new("firebolt", "Firebolt")
            .with_formula("INT")
            .with_damage_type("fire")
            .with_crit(CritSpec::never())
            .with_cost("mana", 5.0)
            .with_cooldown(2)
            .with_on_hit("burning", 1.0)
    }

    #[test]
    fn hit_spends_mana_and_sets_cooldown() {
        let mut p = duo();
        let mut rng = ScriptedRandom::new(vec![0.0]);
        let report = execute_ability(
            &mut p,
            "A",
            &firebolt(),
            &[],
            &env(),
            &CombatConfig::default(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(report.targets, vec!["B".to_string()]);
        assert_eq!(p[0].mana(), 1.0);
        assert_eq!(p[0].cooldown("firebolt"), 2);
        assert_eq!(p[1].hp(), 18.0);
        assert!(p[1].has_status("burning"));
        let kinds: Vec<_> = report.events.iter().map(CombatEvent::kind).collect();
        assert_eq!(kinds, vec!["hit", "effect"]);
    }

    #[test]
    fn gate_failure_is_atomic() {
        let mut p = duo();
        p[0].set_mana(4.0);
        let mut rng = ScriptedRandom::new(vec![0.0]);
        let err = execute_ability(
            &mut p,
            "A",
            &firebolt(),
            &[],
            &env(),
            &CombatConfig::default(),
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err.reason(), "insufficient_mana");
        assert_eq!(p[0].mana(), 4.0);
        assert_eq!(p[1].hp(), 28.0);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn miss_still_spends() {
        let mut p = duo();
        let mut rng = ScriptedRandom::new(vec![0.999]);
        let report = execute_ability(
            &mut p,
            "A",
            &firebolt(),
            &[],
            &env(),
            &CombatConfig::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(report.misses().count(), 1);
        assert_eq!(p[0].mana(), 1.0);
        assert_eq!(p[1].hp(), 28.0);
    }

    #[test]
    fn support_applies_without_rolling_to_hit() {
        let mut p = duo();
        let guard = AbilityDef::new("guard", "Guard")
            .support()
            .with_targeting(TargetingSpec::SelfOnly)
            .with_on_hit("guarding", 1.0);
        let mut rng = ScriptedRandom::new(vec![0.5]);
        let report = execute_ability(
            &mut p,
            "A",
            &guard,
            &[],
            &env(),
            &CombatConfig::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(report.targets, vec!["A".to_string()]);
        assert!(p[0].has_status("guarding"));
        assert_eq!(rng.consumed(), 1);
    }

    #[test]
    fn unknown_actor() {
        let mut p = duo();
        let err = execute_ability(
            &mut p,
            "Z",
            &AbilityDef::basic_attack(),
            &[],
            &env(),
            &CombatConfig::default(),
            &mut ScriptedRandom::new(vec![0.0]),
        )
        .unwrap_err();
        assert_eq!(err, ActionError::UnknownActor("Z".into()));
    }
}
