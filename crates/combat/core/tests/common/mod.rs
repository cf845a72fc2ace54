//! Shared fixtures for combat-core integration tests.
#![allow(dead_code)]

use combat_core::env::starter::starter;
use combat_core::{AiRule, Combatant, CombatConfig, CombatEnv, Encounter, TargetSelector};

/// Aria from the reference duel.
pub fn aria() -> Combatant {
    Combatant::new("A", "Aria")
        .with_team("alpha")
        .with_stat("ATT", 8.0)
        .with_stat("DEX", 8.0)
        .with_stat("ARM", 2.0)
        .with_stat("WPN", 3.0)
        .with_hp(30.0)
        .with_tag("humanoid")
}

/// Belor from the reference duel.
pub fn belor() -> Combatant {
    Combatant::new("B", "Belor")
        .with_team("beta")
        .with_stat("ATT", 6.0)
        .with_stat("DEX", 6.0)
        .with_stat("INT", 12.0)
        .with_stat("ARM", 2.0)
        .with_stat("WPN", 1.0)
        .with_resist("fire", 0.10)
        .with_hp(18.0)
        .with_tag("humanoid")
}

pub fn fighter(id: &str, team: &str, dex: f64) -> Combatant {
    Combatant::new(id, id)
        .with_team(team)
        .with_stat("ATT", 8.0)
        .with_stat("DEX", dex)
        .with_stat("WPN", 3.0)
        .with_stat("ARM", 2.0)
        .with_hp(20.0)
        .with_tag("humanoid")
}

pub fn env() -> CombatEnv {
    starter()
}

pub fn basic_rules() -> Vec<AiRule> {
    vec![AiRule::new("basic_attack", TargetSelector::HighestThreat)]
}

/// Aria vs Belor on starter content, attacking with basic attacks only.
pub fn duel(seed: u64) -> Encounter {
    Encounter::new(vec![aria(), belor()], seed, env(), CombatConfig::default())
        .expect("duel has participants")
        .with_ai_rules(basic_rules())
}

pub fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}
