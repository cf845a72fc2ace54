//! Encounter orchestration.
//!
//! The [`Encounter`] owns the participants, the seeded generator, initiative
//! order, threat table and hazard countdowns of one fight. Manual play goes
//! through [`Encounter::execute_ability`] and [`Encounter::use_item`];
//! automated play through [`Encounter::take_turn`] and
//! [`Encounter::run_until`]. Either way every event lands in one log and
//! every hit feeds the threat table.

mod errors;
mod runner;
mod snapshot;
mod turns;

pub use errors::EncounterError;
pub use runner::{EncounterOutcome, TurnAction, TurnReport};
pub use snapshot::{EncounterSnapshot, SNAPSHOT_VERSION};

use std::collections::BTreeMap;

use crate::action::{self, ActionError, ActionReport};
use crate::config::CombatConfig;
use crate::env::{AiRule, CombatEnv, Phase};
use crate::event::CombatEvent;
use crate::hazard::Environment;
use crate::rng::Pcg32;
use crate::state::Combatant;
use crate::state::roster::index_of;
use crate::threat::ThreatTable;

/// One deterministic fight.
///
/// Given the same participants, seed, content and sequence of calls, two
/// encounters produce identical event logs and final states.
#[derive(Clone, Debug)]
pub struct Encounter {
    participants: Vec<Combatant>,
    /// Participant indices in initiative order.
    order: Vec<usize>,
    pointer: usize,
    round: u32,
    rng: Pcg32,
    env: CombatEnv,
    config: CombatConfig,
    environment: Environment,
    threat: ThreatTable,
    events: Vec<CombatEvent>,
    default_rules: Vec<AiRule>,
    profiles: BTreeMap<String, Vec<AiRule>>,
}

impl Encounter {
    /// Builds an encounter and fixes its initiative order.
    ///
    /// Hazards and the default AI rule list come from `env`.
    ///
    /// # Errors
    ///
    /// [`EncounterError::NoParticipants`] for an empty roster.
    pub fn new(
        participants: Vec<Combatant>,
        seed: u64,
        env: CombatEnv,
        config: CombatConfig,
    ) -> Result<Self, EncounterError> {
        if participants.is_empty() {
            return Err(EncounterError::NoParticipants);
        }
        let order = turns::initiative_order(&participants);
        let environment = Environment::new(env.hazards.clone());
        let default_rules = env.ai_rules.clone();

        let encounter = Self {
            participants,
            order,
            pointer: 0,
            round: 0,
            rng: Pcg32::new(seed),
            env,
            config,
            environment,
            threat: ThreatTable::new(),
            events: Vec::new(),
            default_rules,
            profiles: BTreeMap::new(),
        };
        tracing::debug!(seed, order = ?encounter.order_ids(), "encounter created");
        Ok(encounter)
    }

    /// Replaces the default AI rule list (builder pattern).
    #[must_use]
    pub fn with_ai_rules(mut self, rules: Vec<AiRule>) -> Self {
        self.default_rules = rules;
        self
    }

    /// Gives one combatant its own AI rule list.
    pub fn set_ai_profile(&mut self, combatant_id: impl Into<String>, rules: Vec<AiRule>) {
        self.profiles.insert(combatant_id.into(), rules);
    }

    /// Rule list the AI uses for `combatant_id`.
    pub fn ai_rules_for(&self, combatant_id: &str) -> &[AiRule] {
        self.profiles
            .get(combatant_id)
            .unwrap_or(&self.default_rules)
    }

    // ===== accessors =====

    pub fn participants(&self) -> &[Combatant] {
        &self.participants
    }

    pub fn participant(&self, id: &str) -> Option<&Combatant> {
        self.participants.iter().find(|c| c.id == id)
    }

    /// Mutable access for scripted setups (e.g. placing a combatant in lava).
    pub fn participant_mut(&mut self, id: &str) -> Option<&mut Combatant> {
        self.participants.iter_mut().find(|c| c.id == id)
    }

    /// Every event produced so far, in order.
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn threat(&self) -> &ThreatTable {
        &self.threat
    }

    pub fn env(&self) -> &CombatEnv {
        &self.env
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Team ids with at least one living member.
    pub fn living_teams(&self) -> Vec<&str> {
        crate::state::roster::living_teams(&self.participants)
            .into_iter()
            .collect()
    }

    /// True while at least two teams have living members.
    pub fn is_contested(&self) -> bool {
        self.living_teams().len() >= 2
    }

    // ===== manual play =====

    /// Executes a catalog ability for `actor_id`.
    ///
    /// Events are appended to the log and fed to the threat table.
    ///
    /// # Errors
    ///
    /// [`ActionError::UnknownAbility`] for an id missing from the catalog,
    /// otherwise whatever gating rejected.
    pub fn execute_ability(
        &mut self,
        actor_id: &str,
        ability_id: &str,
        target_ids: &[String],
    ) -> Result<ActionReport, ActionError> {
        let ability = self
            .env
            .abilities
            .get(ability_id)
            .ok_or_else(|| ActionError::UnknownAbility(ability_id.to_string()))?;
        let report = action::execute_ability(
            &mut self.participants,
            actor_id,
            ability,
            target_ids,
            &self.env,
            &self.config,
            &mut self.rng,
        )?;
        self.record(&report.events);
        Ok(report)
    }

    /// Uses a catalog item from `user_id`'s inventory.
    ///
    /// # Errors
    ///
    /// [`ActionError::NoItem`] for an id missing from the catalog, otherwise
    /// whatever gating rejected.
    pub fn use_item(
        &mut self,
        user_id: &str,
        item_id: &str,
        target_ids: &[String],
    ) -> Result<ActionReport, ActionError> {
        let item = self
            .env
            .items
            .get(item_id)
            .ok_or_else(|| ActionError::NoItem(item_id.to_string()))?;
        let report = action::use_item(
            &mut self.participants,
            user_id,
            item,
            target_ids,
            &self.env,
            &self.config,
            &mut self.rng,
        )?;
        self.record(&report.events);
        Ok(report)
    }

    /// Ticks `actor_id`'s cooldowns; false when the id is unknown.
    pub fn tick_cooldowns(&mut self, actor_id: &str) -> bool {
        match index_of(&self.participants, actor_id) {
            Some(index) => {
                self.participants[index].tick_cooldowns();
                true
            }
            None => false,
        }
    }

    /// Fires `phase` hazards on every participant and logs the events.
    pub fn process_hazards(&mut self, phase: Phase) -> Vec<CombatEvent> {
        let events = self.environment.process_phase(
            phase,
            &mut self.participants,
            &self.env.statuses,
            &self.config,
            &mut self.rng,
        );
        self.events.extend(events.iter().cloned());
        events
    }

    /// Multiplies every threat score by the configured decay factor.
    pub fn decay_threat(&mut self) {
        self.threat.decay_all(self.config.threat_decay);
    }

    /// Logs action events and updates threat from their hits.
    fn record(&mut self, events: &[CombatEvent]) {
        self.threat.record_events(events, &self.config);
        self.events.extend(events.iter().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::starter::starter;

    fn duo() -> Vec<Combatant> {
        vec![
            Combatant::new("A", "Aria")
                .with_team("alpha")
                .with_stat("DEX", 7.0)
                .with_hp(30.0),
            Combatant::new("B", "Belor")
                .with_team("beta")
                .with_stat("DEX", 8.0)
                .with_hp(28.0),
        ]
    }

    #[test]
    fn empty_roster_is_rejected() {
        let err = Encounter::new(Vec::new(), 1, starter(), CombatConfig::default()).unwrap_err();
        assert_eq!(err, EncounterError::NoParticipants);
    }

    #[test]
    fn order_and_pointer_cycle() {
        let mut enc = Encounter::new(duo(), 1, starter(), CombatConfig::default()).unwrap();
        assert_eq!(enc.order_ids(), vec!["B", "A"]);
        assert_eq!(enc.round(), 0);
        assert_eq!(enc.next_turn(), "B");
        assert_eq!(enc.round(), 1);
        assert_eq!(enc.next_turn(), "A");
        assert_eq!(enc.next_turn(), "B");
        assert_eq!(enc.round(), 2);
    }

    #[test]
    fn unknown_ability_id() {
        let mut enc = Encounter::new(duo(), 1, starter(), CombatConfig::default()).unwrap();
        let err = enc.execute_ability("A", "meteor", &[]).unwrap_err();
        assert_eq!(err, ActionError::UnknownAbility("meteor".into()));
        assert!(enc.events().is_empty());
    }

    #[test]
    fn profiles_override_default_rules() {
        let mut enc = Encounter::new(duo(), 1, starter(), CombatConfig::default()).unwrap();
        assert_eq!(enc.ai_rules_for("A").len(), 4);
        enc.set_ai_profile("A", Vec::new());
        assert!(enc.ai_rules_for("A").is_empty());
        assert_eq!(enc.ai_rules_for("B").len(), 4);
    }
}
