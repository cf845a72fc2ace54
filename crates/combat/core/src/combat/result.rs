//! Attack result type and the resolution entry point.

use crate::config::CombatConfig;
use crate::env::{AbilityDef, BodyPartConfig};
use crate::rng::RandomSource;
use crate::state::Combatant;

use super::body::pick_body_part;
use super::damage::{apply_resistance, attack_context, base_damage, crit_chance, crit_multiplier};
use super::hit::{calculate_hit_chance, check_hit};

/// Outcome of one attack roll against one target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackResult {
    pub hit: bool,
    pub crit: bool,
    /// Damage after crit and resistance, rounded to one decimal. `0.0` on a miss.
    pub amount: f64,
    pub damage_type: String,
    /// Empty on a miss.
    pub body_part: String,
}

impl AttackResult {
    fn miss(damage_type: &str) -> Self {
        Self {
            hit: false,
            crit: false,
            amount: 0.0,
            damage_type: damage_type.to_string(),
            body_part: String::new(),
        }
    }
}

/// Resolve a complete attack (hit, crit, damage, body part).
///
/// Side-effect free on both combatants. See the module docs for the
/// exact draw sequence.
///
/// # Arguments
///
/// * `attacker` - Combatant making the attack
/// * `target` - Combatant being attacked
/// * `ability` - Formula, damage type and crit parameters
/// * `body` - Body part groups used for the hit location
/// * `config` - Hit chance and resistance tuning
/// * `rng` - Injected random source
pub fn resolve_attack(
    attacker: &Combatant,
    target: &Combatant,
    ability: &AbilityDef,
    body: &BodyPartConfig,
    config: &CombatConfig,
    rng: &mut dyn RandomSource,
) -> AttackResult {
    let ctx = attack_context(attacker, target);

    // 1. Hit roll
    let hit_chance = calculate_hit_chance(ctx.get("DEX"), ctx.get("T_DEX"), config);
    let roll = rng.randf();
    if !check_hit(hit_chance, roll) {
        tracing::trace!(attacker = %attacker.id, target = %target.id, hit_chance, roll, "miss");
        return AttackResult::miss(&ability.damage_type);
    }

    // 2. Crit roll
    let chance = crit_chance(ability, &ctx, config);
    let crit = rng.randf() < chance;

    // 3. Damage
    let mut amount = base_damage(ability, &ctx);
    if crit {
        amount *= crit_multiplier(ability, config);
    }
    let amount = apply_resistance(amount, target.resist_for(&ability.damage_type), config);

    // 4. Hit location
    let body_part = pick_body_part(target, body, rng);

    tracing::trace!(
        attacker = %attacker.id,
        target = %target.id,
        crit,
        amount,
        body_part = %body_part,
        "hit"
    );

    AttackResult {
        hit: true,
        crit,
        amount,
        damage_type: ability.damage_type.clone(),
        body_part,
    }
}
