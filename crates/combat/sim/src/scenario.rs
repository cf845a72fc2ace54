//! Built-in scenarios.
use std::io::Write;

use anyhow::{Context, Result, ensure};
use combat_core::env::starter::starter;
use combat_core::{CombatConfig, Combatant, Encounter};
use serde_json::json;

use crate::config::SimConfig;

fn aria() -> Combatant {
    Combatant::new("A", "Aria")
        .with_team("alpha")
        .with_stat("ATT", 8.0)
        .with_stat("DEX", 8.0)
        .with_stat("ARM", 2.0)
        .with_stat("WPN", 3.0)
        .with_hp(30.0)
        .with_tag("humanoid")
        .with_item("healing_potion", 1)
}

fn belor() -> Combatant {
    Combatant::new("B", "Belor")
        .with_team("beta")
        .with_stat("ATT", 6.0)
        .with_stat("DEX", 6.0)
        .with_stat("INT", 12.0)
        .with_stat("ARM", 2.0)
        .with_stat("WPN", 1.0)
        .with_resist("fire", 0.10)
        .with_hp(18.0)
        .with_mana(10.0)
        .with_tag("humanoid")
}

fn duel_encounter(seed: u64) -> Result<Encounter> {
    Encounter::new(vec![aria(), belor()], seed, starter(), CombatConfig::default())
        .context("failed to create duel encounter")
}

/// Runs the duel and writes events, then a summary, as JSON lines.
pub fn duel(config: &SimConfig, out: &mut impl Write) -> Result<()> {
    let mut encounter = duel_encounter(config.seed)?;
    tracing::info!(seed = config.seed, max_rounds = config.max_rounds, "starting duel");

    let outcome = encounter.run_until(config.max_rounds);
    for event in encounter.events() {
        let line = serde_json::to_string(event).context("failed to encode event")?;
        writeln!(out, "{line}")?;
    }

    let digest = encounter.state_digest().context("failed to hash final state")?;
    let hp: serde_json::Map<_, _> = encounter
        .participants()
        .iter()
        .map(|c| (c.id.clone(), json!(c.hp())))
        .collect();
    let summary = json!({
        "type": "summary",
        "outcome": outcome,
        "hp": hp,
        "digest": hex::encode(digest),
    });
    writeln!(out, "{summary}")?;

    tracing::info!(
        rounds = outcome.rounds,
        winner = outcome.winner.as_deref().unwrap_or("none"),
        "duel finished"
    );
    Ok(())
}

/// Number of turns compared after the restore.
const LOCKSTEP_TURNS: usize = 6;

/// Advances an encounter, restores its snapshot into a differently seeded
/// copy and checks both produce the same turns afterwards.
pub fn snapshot(config: &SimConfig, out: &mut impl Write) -> Result<()> {
    let mut original = duel_encounter(config.seed)?;
    original.take_turn();
    original.take_turn();

    let blob = original.snapshot().to_bytes()?;
    let snapshot = combat_core::EncounterSnapshot::from_bytes(&blob)?;
    let mut restored = duel_encounter(config.seed.wrapping_add(1))?;
    restored.restore(&snapshot)?;
    tracing::info!(bytes = blob.len(), "snapshot restored into a fresh encounter");

    for turn in 0..LOCKSTEP_TURNS {
        let left = original.take_turn();
        let right = restored.take_turn();
        ensure!(
            left.actor_id == right.actor_id,
            "turn {turn}: actor diverged ({} vs {})",
            left.actor_id,
            right.actor_id
        );
        ensure!(left.events == right.events, "turn {turn}: events diverged");
        writeln!(
            out,
            "{}",
            json!({ "type": "lockstep", "turn": turn, "actor_id": left.actor_id })
        )?;
    }

    let digest = original.state_digest()?;
    ensure!(
        digest == restored.state_digest()?,
        "final state digests differ"
    );
    writeln!(
        out,
        "{}",
        json!({ "type": "summary", "turns": LOCKSTEP_TURNS, "digest": hex::encode(digest) })
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duel_ends_with_a_summary_line() {
        let mut out = Vec::new();
        duel(&SimConfig::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let last = text.lines().last().unwrap();
        let summary: serde_json::Value = serde_json::from_str(last).unwrap();
        assert_eq!(summary["type"], "summary");
        assert_eq!(summary["digest"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn snapshot_scenario_stays_in_lockstep() {
        let mut out = Vec::new();
        snapshot(&SimConfig::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), LOCKSTEP_TURNS + 1);
    }
}
