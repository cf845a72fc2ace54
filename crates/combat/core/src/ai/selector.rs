//! AI target selectors.

use crate::env::TargetSelector;
use crate::rng::RandomSource;
use crate::state::Combatant;
use crate::state::roster::living_enemies;
use crate::threat::ThreatTable;

/// Resolves a selector to participant indices.
///
/// Only `random_enemy` draws, and only when there is an enemy to pick.
/// An empty result means the rule cannot fire.
pub fn resolve_selector(
    selector: TargetSelector,
    participants: &[Combatant],
    actor: usize,
    threat: &ThreatTable,
    rng: &mut dyn RandomSource,
) -> Vec<usize> {
    let me = &participants[actor];
    let enemies = living_enemies(participants, &me.team);
    match selector {
        TargetSelector::SelfOnly => vec![actor],
        TargetSelector::AllEnemies => enemies,
        TargetSelector::HighestThreat => threat
            .highest_threat_target(
                &me.id,
                enemies.iter().map(|&index| participants[index].id.as_str()),
            )
            .and_then(|id| enemies.iter().copied().find(|&i| participants[i].id == id))
            .into_iter()
            .collect(),
        TargetSelector::LowestHpEnemy => {
            let mut lowest: Option<usize> = None;
            for index in enemies {
                match lowest {
                    Some(best) if participants[best].hp() <= participants[index].hp() => {}
                    _ => lowest = Some(index),
                }
            }
            lowest.into_iter().collect()
        }
        TargetSelector::RandomEnemy => match rng.choose_index(enemies.len()) {
            Ok(pick) => vec![enemies[pick]],
            Err(_) => Vec::new(),
        },
    }
}
