//! Damage, crit and resistance math.

use crate::config::CombatConfig;
use crate::env::AbilityDef;
use crate::formula::{FormulaContext, evaluate};
use crate::state::Combatant;

/// Formula variables for an attack.
///
/// `ATT`, `DEX`, `INT`, `STA` and `WPN` come from the attacker; `ARM` and
/// `T_DEX` come from the target.
pub fn attack_context(attacker: &Combatant, target: &Combatant) -> FormulaContext {
    FormulaContext::new()
        .with("ATT", attacker.stat("ATT"))
        .with("DEX", attacker.stat("DEX"))
        .with("INT", attacker.stat("INT"))
        .with("STA", attacker.stat("STA"))
        .with("WPN", attacker.stat("WPN"))
        .with("ARM", target.stat("ARM"))
        .with("T_DEX", target.stat("DEX"))
}

/// Crit probability for an ability, clamped to `[0, 1]`.
///
/// Falls back to the configured default chance when the expression fails.
pub fn crit_chance(ability: &AbilityDef, ctx: &FormulaContext, config: &CombatConfig) -> f64 {
    let chance = match evaluate(&ability.crit.chance, ctx) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(ability = %ability.id, %error, "crit formula failed, using default chance");
            config.default_crit_chance
        }
    };
    clamp_unit(chance)
}

/// Crit damage multiplier for an ability.
///
/// A multiplier below `1.0` (or NaN) would make crits weaker than normal
/// hits; such content falls back to the configured default.
pub fn crit_multiplier(ability: &AbilityDef, config: &CombatConfig) -> f64 {
    let multiplier = ability.crit.multiplier;
    if multiplier >= 1.0 && multiplier.is_finite() {
        multiplier
    } else {
        tracing::warn!(ability = %ability.id, multiplier, "invalid crit multiplier, using default");
        config.default_crit_multiplier
    }
}

/// Base (pre-crit, pre-resist) damage, floored at zero.
///
/// A failing formula degrades to the default `ATT + WPN - ARM*0.6`.
pub fn base_damage(ability: &AbilityDef, ctx: &FormulaContext) -> f64 {
    let value = match evaluate(&ability.formula, ctx) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(ability = %ability.id, %error, "damage formula failed, using default formula");
            ctx.get("ATT") + ctx.get("WPN") - ctx.get("ARM") * 0.6
        }
    };
    value.max(0.0)
}

/// Applies a clamped resistance and rounds to one decimal place.
pub fn apply_resistance(amount: f64, raw_resist: f64, config: &CombatConfig) -> f64 {
    round_tenth(amount * (1.0 - config.clamp_resist(raw_resist)))
}

/// Rounds to one decimal place.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
