//! Item gating and use.

use super::ability::resolve_targets;
use super::targeting::select_targets;
use super::{ActionError, ActionReport, ActionSource};
use crate::config::CombatConfig;
use crate::effect::{apply_status, cleanse_status};
use crate::env::{CombatEnv, ItemDef, ItemKind};
use crate::event::CombatEvent;
use crate::rng::RandomSource;
use crate::state::Combatant;
use crate::state::roster::index_of;

/// Items are gated only by inventory count.
pub fn can_use_item(user: &Combatant, item: &ItemDef) -> Result<(), ActionError> {
    if user.item_count(&item.id) == 0 {
        return Err(ActionError::NoItem(item.id.clone()));
    }
    Ok(())
}

/// Uses one `item` from `user_id`'s inventory.
///
/// - Consumables apply their effects to each listed living target (the user
///   when none are listed). Unknown or dead target ids are skipped.
/// - Throwables are resolved as an attack through the item's ability view,
///   with the same target validation and taunt handling as abilities.
///
/// One item is consumed on success regardless of per-effect outcomes.
///
/// # Errors
///
/// `no_item` when none are held, `unsupported_item_kind` for unknown kinds,
/// and the targeting rejections for throwables.
pub fn use_item(
    participants: &mut [Combatant],
    user_id: &str,
    item: &ItemDef,
    target_ids: &[String],
    env: &CombatEnv,
    config: &CombatConfig,
    rng: &mut dyn RandomSource,
) -> Result<ActionReport, ActionError> {
    let user = index_of(participants, user_id)
        .ok_or_else(|| ActionError::UnknownActor(user_id.to_string()))?;
    can_use_item(&participants[user], item)?;

    let report = match item.kind {
        ItemKind::Consumable => consume(participants, user, item, target_ids, env),
        ItemKind::Throwable => {
            let ability = item.as_ability();
            let targets = select_targets(
                participants,
                user,
                ability.targeting,
                target_ids,
                &env.statuses,
            )?
            .finish(rng)?;
            let source = ActionSource::Item(item.id.clone());
            let events =
                resolve_targets(participants, user, &ability, &targets, &source, env, config, rng);
            ActionReport {
                targets: targets
                    .iter()
                    .map(|&index| participants[index].id.clone())
                    .collect(),
                events,
            }
        }
        ItemKind::Unsupported => return Err(ActionError::UnsupportedItemKind),
    };

    participants[user].consume_item(&item.id);
    tracing::debug!(user = user_id, item = %item.id, events = report.events.len(), "item used");
    Ok(report)
}

fn consume(
    participants: &mut [Combatant],
    user: usize,
    item: &ItemDef,
    target_ids: &[String],
    env: &CombatEnv,
) -> ActionReport {
    let user_id = participants[user].id.clone();
    let requested: Vec<String> = if target_ids.is_empty() {
        vec![user_id.clone()]
    } else {
        target_ids.to_vec()
    };
    let effects = &item.effects;
    let mut report = ActionReport::default();

    for id in &requested {
        let Some(index) = index_of(participants, id) else {
            continue;
        };
        let target = &mut participants[index];
        if !target.is_alive() {
            continue;
        }
        report.targets.push(target.id.clone());

        if let Some(amount) = effects.heal_hp {
            let healed = target.heal(amount);
            report.events.push(CombatEvent::Heal {
                actor_id: Some(user_id.clone()),
                target_id: target.id.clone(),
                amount: healed,
            });
        }
        if let Some(amount) = effects.restore_mana {
            let restored = target.restore_mana(amount);
            report.events.push(CombatEvent::Mana {
                actor_id: Some(user_id.clone()),
                target_id: target.id.clone(),
                amount: restored,
            });
        }
        for status in &effects.apply_status {
            if apply_status(target, status, &env.statuses, Some(&user_id)).is_some() {
                report.events.push(CombatEvent::Effect {
                    actor_id: Some(user_id.clone()),
                    target_id: target.id.clone(),
                    effect_id: status.clone(),
                    ability_id: None,
                    item_id: Some(item.id.clone()),
                });
            }
        }
        for status in &effects.cleanse_status {
            if cleanse_status(target, status) {
                report.events.push(CombatEvent::Cleanse {
                    actor_id: Some(user_id.clone()),
                    target_id: target.id.clone(),
                    effect_id: status.clone(),
                });
            }
        }
    }
    report
}
