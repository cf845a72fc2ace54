//! Automated turn loop.
//!
//! One turn, for the actor under the pointer:
//!
//! 1. skip if dead
//! 2. tick the actor's cooldowns
//! 3. start-of-turn status ticks, then start-of-turn hazards
//! 4. if still alive, run the AI; fall back to the basic attack when no rule fires
//! 5. feed the action's hits into the threat table
//! 6. end-of-turn hazards
//!
//! Hazards here only touch the acting combatant, so each participant is
//! exposed once per round per phase.

use super::Encounter;
use crate::action::{ActionError, execute_ability};
use crate::ai::choose_and_execute;
use crate::effect::tick_start_of_turn;
use crate::env::Phase;
use crate::event::CombatEvent;

/// What the actor did with its turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum TurnAction {
    /// The actor was dead when its turn came up or died before acting.
    Dead,
    /// An AI rule fired.
    Rule { rule_index: usize, ability_id: String },
    /// No rule fired and the basic attack was used instead.
    Fallback { ability_id: String },
    /// Neither a rule nor the basic attack could execute.
    Passed { reason: String },
}

/// Everything that happened during one turn.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnReport {
    pub round: u32,
    pub actor_id: String,
    pub action: TurnAction,
    pub events: Vec<CombatEvent>,
}

/// Result of [`Encounter::run_until`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterOutcome {
    /// Rounds started so far.
    pub rounds: u32,
    /// Turns taken during this call, skipped dead actors included.
    pub turns: u32,
    /// The only team left standing, when there is exactly one.
    pub winner: Option<String>,
    /// True when fewer than two teams have living members.
    pub finished: bool,
}

impl Encounter {
    /// Plays the next actor's turn.
    pub fn take_turn(&mut self) -> TurnReport {
        let actor_id = self.next_turn();
        let round = self.round;
        let Some(actor) = crate::state::roster::index_of(&self.participants, &actor_id) else {
            return TurnReport {
                round,
                actor_id,
                action: TurnAction::Dead,
                events: Vec::new(),
            };
        };
        if !self.participants[actor].is_alive() {
            tracing::trace!(actor = %actor_id, "dead actor skipped");
            return TurnReport {
                round,
                actor_id,
                action: TurnAction::Dead,
                events: Vec::new(),
            };
        }

        self.participants[actor].tick_cooldowns();

        let mut events =
            tick_start_of_turn(&mut self.participants[actor], &self.env.statuses, &self.config);
        events.extend(self.actor_hazards(actor, Phase::StartOfTurn));

        let action = if self.participants[actor].is_alive() {
            let (action, action_events) = self.act(&actor_id);
            self.threat.record_events(&action_events, &self.config);
            events.extend(action_events);
            events.extend(self.actor_hazards(actor, Phase::EndOfTurn));
            action
        } else {
            TurnAction::Dead
        };

        self.events.extend(events.iter().cloned());
        TurnReport {
            round,
            actor_id,
            action,
            events,
        }
    }

    /// Plays turns until the pointer wraps back to the front of the order.
    ///
    /// Stops early once the fight is decided.
    pub fn run_round(&mut self) -> Vec<TurnReport> {
        let mut reports = Vec::new();
        loop {
            reports.push(self.take_turn());
            if self.pointer == 0 || !self.is_contested() {
                return reports;
            }
        }
    }

    /// Plays turns until at most one team is left or `max_rounds` rounds
    /// have been completed.
    pub fn run_until(&mut self, max_rounds: u32) -> EncounterOutcome {
        let mut turns = 0;
        while self.is_contested() && !(self.pointer == 0 && self.round >= max_rounds) {
            self.take_turn();
            turns += 1;
        }

        let teams = self.living_teams();
        let winner = match teams.as_slice() {
            [team] => Some(team.to_string()),
            _ => None,
        };
        let outcome = EncounterOutcome {
            rounds: self.round,
            turns,
            finished: teams.len() < 2,
            winner,
        };
        tracing::debug!(?outcome, "run finished");
        outcome
    }

    /// AI decision with the basic attack as fallback.
    fn act(&mut self, actor_id: &str) -> (TurnAction, Vec<CombatEvent>) {
        let rules = self
            .profiles
            .get(actor_id)
            .unwrap_or(&self.default_rules);
        let decision = choose_and_execute(
            &mut self.participants,
            actor_id,
            rules,
            &self.threat,
            &self.env,
            &self.config,
            &mut self.rng,
        );
        let rejected = match decision {
            Ok(decision) => {
                let action = TurnAction::Rule {
                    rule_index: decision.rule_index,
                    ability_id: decision.ability_id,
                };
                return (action, decision.report.events);
            }
            Err(error) => error,
        };

        let basic = self.env.basic_attack();
        match execute_ability(
            &mut self.participants,
            actor_id,
            &basic,
            &[],
            &self.env,
            &self.config,
            &mut self.rng,
        ) {
            Ok(report) => (
                TurnAction::Fallback {
                    ability_id: basic.id,
                },
                report.events,
            ),
            Err(error) => {
                tracing::debug!(actor = actor_id, ai = %rejected, fallback = %error, "actor passes");
                (
                    TurnAction::Passed {
                        reason: fallback_reason(&rejected, &error),
                    },
                    Vec::new(),
                )
            }
        }
    }

    /// Runs one phase of hazards on a single participant.
    fn actor_hazards(&mut self, actor: usize, phase: Phase) -> Vec<CombatEvent> {
        self.environment.process_phase(
            phase,
            std::slice::from_mut(&mut self.participants[actor]),
            &self.env.statuses,
            &self.config,
            &mut self.rng,
        )
    }
}

fn fallback_reason(ai: &ActionError, fallback: &ActionError) -> String {
    match ai {
        ActionError::NoRuleMatched => fallback.reason(),
        other => other.reason(),
    }
}
