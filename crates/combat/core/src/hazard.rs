//! Environmental hazards.
//!
//! [`Environment`] owns the encounter's hazard definitions and the
//! remaining-round counter of each finite hazard. The encounter calls
//! [`Environment::process_phase`] around each turn and
//! [`Environment::advance_round`] at every round boundary.

use crate::combat::apply_resistance;
use crate::config::CombatConfig;
use crate::effect::{apply_status, tick_context};
use crate::env::{Catalog, HazardDef, Phase, StatusEffectDef};
use crate::event::{CombatEvent, HazardEventKind};
use crate::formula::evaluate_or;
use crate::rng::RandomSource;
use crate::state::Combatant;

/// A hazard definition with its countdown.
#[derive(Clone, Debug, PartialEq)]
struct ActiveHazard {
    def: HazardDef,
    /// Rounds left for finite hazards; unused when `duration_rounds == 0`.
    remaining_rounds: u32,
}

impl ActiveHazard {
    fn is_active(&self) -> bool {
        self.def.duration_rounds == 0 || self.remaining_rounds > 0
    }

    fn covers(&self, combatant: &Combatant) -> bool {
        let targeting = &self.def.targeting;
        combatant.is_alive()
            && (targeting.locations.is_empty() || targeting.locations.contains(&combatant.location))
            && targeting
                .team
                .as_ref()
                .is_none_or(|team| *team == combatant.team)
            && !targeting
                .require_tag_absent
                .iter()
                .any(|tag| combatant.has_tag(tag))
    }
}

/// Hazards active in one encounter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Environment {
    hazards: Vec<ActiveHazard>,
}

impl Environment {
    pub fn new(hazards: Vec<HazardDef>) -> Self {
        Self {
            hazards: hazards
                .into_iter()
                .map(|def| ActiveHazard {
                    remaining_rounds: def.duration_rounds,
                    def,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }

    /// True while the hazard with `hazard_id` would still fire.
    pub fn is_active(&self, hazard_id: &str) -> bool {
        self.hazards
            .iter()
            .any(|h| h.def.id == hazard_id && h.is_active())
    }

    /// Counts finite hazards down by one round.
    pub fn advance_round(&mut self) {
        for hazard in &mut self.hazards {
            if hazard.def.duration_rounds > 0 && hazard.remaining_rounds > 0 {
                hazard.remaining_rounds -= 1;
                if hazard.remaining_rounds == 0 {
                    tracing::debug!(hazard = %hazard.def.id, "hazard expired");
                }
            }
        }
    }

    /// Remaining-round counters, in definition order.
    pub fn remaining_rounds(&self) -> Vec<u32> {
        self.hazards.iter().map(|h| h.remaining_rounds).collect()
    }

    /// Restores counters taken from [`Self::remaining_rounds`].
    ///
    /// Returns false, changing nothing, when the lengths differ.
    pub(crate) fn restore_remaining_rounds(&mut self, counters: &[u32]) -> bool {
        if counters.len() != self.hazards.len() {
            return false;
        }
        for (hazard, remaining) in self.hazards.iter_mut().zip(counters) {
            hazard.remaining_rounds = *remaining;
        }
        true
    }

    /// Fires every active hazard of `phase` on the eligible participants.
    ///
    /// Hazards run in definition order and participants in slice order. Per
    /// participant the effects apply as damage, heal, mana, then each status
    /// application (one draw each). A participant killed by the damage
    /// receives nothing further from that hazard.
    pub fn process_phase(
        &self,
        phase: Phase,
        participants: &mut [Combatant],
        statuses: &Catalog<StatusEffectDef>,
        config: &CombatConfig,
        rng: &mut dyn RandomSource,
    ) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        for hazard in &self.hazards {
            if hazard.def.phase != phase || !hazard.is_active() {
                continue;
            }
            for combatant in participants.iter_mut() {
                if hazard.covers(combatant) {
                    apply_hazard(&hazard.def, combatant, statuses, config, rng, &mut events);
                }
            }
        }
        events
    }
}

fn apply_hazard(
    hazard: &HazardDef,
    target: &mut Combatant,
    statuses: &Catalog<StatusEffectDef>,
    config: &CombatConfig,
    rng: &mut dyn RandomSource,
    events: &mut Vec<CombatEvent>,
) {
    let effects = &hazard.effects;
    let target_id = target.id.clone();
    let event = |kind, amount, dtype, effect_id| CombatEvent::Hazard {
        hazard_id: hazard.id.clone(),
        target_id: target_id.clone(),
        kind,
        amount,
        dtype,
        effect_id,
    };

    if let Some(damage) = &effects.damage {
        let base = evaluate_or(&damage.amount, &tick_context(target), 0.0).max(0.0);
        let resist = damage
            .damage_type
            .as_deref()
            .map(|dtype| target.resist_for(dtype))
            .unwrap_or(0.0);
        let amount = apply_resistance(base, resist, config);
        if amount > 0.0 {
            target.take_damage(amount);
            events.push(event(
                HazardEventKind::Damage,
                amount,
                damage.damage_type.clone(),
                None,
            ));
        }
        if !target.is_alive() {
            tracing::debug!(hazard = %hazard.id, target = %target.id, "hazard was lethal");
            return;
        }
    }

    if let Some(amount) = effects.heal.filter(|a| *a > 0.0) {
        let healed = target.heal(amount);
        events.push(event(HazardEventKind::Heal, healed, None, None));
    }

    if let Some(amount) = effects.mana.filter(|a| *a > 0.0) {
        let restored = target.restore_mana(amount);
        events.push(event(HazardEventKind::Resource, restored, None, None));
    }

    let source = format!("hazard:{}", hazard.id);
    for application in &effects.apply_status {
        let chance = application.chance.clamp(0.0, 1.0);
        let roll = rng.randf();
        if chance <= 0.0 || roll > chance {
            continue;
        }
        if apply_status(target, &application.id, statuses, Some(&source)).is_some() {
            events.push(event(
                HazardEventKind::Effect,
                0.0,
                None,
                Some(application.id.clone()),
            ));
        }
    }
}
