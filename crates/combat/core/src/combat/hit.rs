//! Hit chance and accuracy calculations.

use crate::config::CombatConfig;

/// Calculate hit chance from attacker and target DEX.
///
/// # Formula
///
/// ```text
/// hit_chance = base + per_dex * (attacker_dex - target_dex)
/// clamped to [min, max]
/// ```
///
/// Inverted bounds collapse to `min`; a NaN bound is ignored.
pub fn calculate_hit_chance(attacker_dex: f64, target_dex: f64, config: &CombatConfig) -> f64 {
    let chance = config.base_hit_chance + config.hit_chance_per_dex * (attacker_dex - target_dex);
    let min = config.min_hit_chance;
    chance.max(min).min(config.max_hit_chance.max(min))
}

/// A roll in `[0, 1)` hits unless it exceeds the hit chance.
pub fn check_hit(hit_chance: f64, roll: f64) -> bool {
    roll <= hit_chance
}
