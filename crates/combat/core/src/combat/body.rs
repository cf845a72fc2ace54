//! Body part selection.

use crate::config::CombatConfig;
use crate::env::BodyPartConfig;
use crate::rng::RandomSource;
use crate::state::Combatant;

/// Picks the body part struck on a hit.
///
/// Consumes one draw, except when the target's group defines no parts, in
/// which case `body` is reported without drawing.
pub fn pick_body_part(
    target: &Combatant,
    body: &BodyPartConfig,
    rng: &mut dyn RandomSource,
) -> String {
    let Some(group) = body.group_for(&target.tags) else {
        return CombatConfig::FALLBACK_BODY_PART.to_string();
    };
    let parts = body.parts(group);
    if parts.is_empty() {
        return CombatConfig::FALLBACK_BODY_PART.to_string();
    }

    let picked = match body.weights_for(group) {
        Some(weights) => rng.weighted_index(&weights),
        None => rng.choose_index(parts.len()),
    };
    match picked {
        Ok(index) => parts[index].clone(),
        Err(_) => CombatConfig::FALLBACK_BODY_PART.to_string(),
    }
}
