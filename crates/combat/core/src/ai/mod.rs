//! Rule-ordered combat AI.
//!
//! An actor's rule list becomes a behavior tree: a [`selector`] over one
//! [`sequence`] per rule. Each sequence resolves the rule's targets, checks
//! its requirements, then tries to execute the ability. The first rule whose
//! execution succeeds ends the turn.
//!
//! Draw order per rule: the target selector (`random_enemy` only), then
//! whatever the ability execution draws. Rules rejected by requirements or
//! gating draw nothing beyond their selector.

mod require;
mod selector;

pub use require::requirements_met;
pub use selector::resolve_selector;

use behavior_tree::{Behavior, Node, Status, action, condition, selector, sequence};

use crate::action::{ActionError, ActionReport, execute_ability};
use crate::config::CombatConfig;
use crate::env::{AbilityDef, AiRule, CombatEnv};
use crate::rng::RandomSource;
use crate::state::Combatant;
use crate::state::roster::index_of;
use crate::threat::ThreatTable;

/// The rule that fired and what it did.
#[derive(Clone, Debug, PartialEq)]
pub struct AiDecision {
    /// Position of the rule in the list it came from.
    pub rule_index: usize,
    pub ability_id: String,
    pub report: ActionReport,
}

/// Everything a rule node reads or writes during one decision.
struct TurnContext<'a> {
    participants: &'a mut [Combatant],
    actor: usize,
    threat: &'a ThreatTable,
    env: &'a CombatEnv,
    config: &'a CombatConfig,
    rng: &'a mut dyn RandomSource,
    /// Targets resolved by the rule currently being evaluated.
    targets: Vec<usize>,
    decision: Option<AiDecision>,
}

impl TurnContext<'_> {
    fn select(&mut self, rule: &AiRule) -> bool {
        self.targets = resolve_selector(
            rule.target,
            self.participants,
            self.actor,
            self.threat,
            self.rng,
        );
        !self.targets.is_empty()
    }

    fn requirements_hold(&self, rule: &AiRule, ability: &AbilityDef) -> bool {
        let target = self.targets.first().map(|&i| &self.participants[i]);
        requirements_met(
            &rule.require,
            &self.participants[self.actor],
            target,
            ability,
            self.config,
        )
    }

    fn execute(&mut self, rule_index: usize, ability: &AbilityDef) -> bool {
        let actor_id = self.participants[self.actor].id.clone();
        let target_ids: Vec<String> = self
            .targets
            .iter()
            .map(|&i| self.participants[i].id.clone())
            .collect();
        match execute_ability(
            self.participants,
            &actor_id,
            ability,
            &target_ids,
            self.env,
            self.config,
            self.rng,
        ) {
            Ok(report) => {
                tracing::debug!(actor = %actor_id, rule = rule_index, ability = %ability.id, "ai rule fired");
                self.decision = Some(AiDecision {
                    rule_index,
                    ability_id: ability.id.clone(),
                    report,
                });
                true
            }
            Err(error) => {
                tracing::trace!(actor = %actor_id, ability = %ability.id, %error, "ai rule rejected");
                false
            }
        }
    }
}

fn rule_node<'n, 'a: 'n>(
    rule_index: usize,
    rule: &'n AiRule,
    ability: &'n AbilityDef,
) -> Node<'n, TurnContext<'a>> {
    sequence(vec![
        action(move |ctx: &mut TurnContext<'a>| Status::from(ctx.select(rule))),
        condition(move |ctx: &TurnContext<'a>| ctx.requirements_hold(rule, ability)),
        action(move |ctx: &mut TurnContext<'a>| Status::from(ctx.execute(rule_index, ability))),
    ])
}

/// Runs `rules` for `actor_id` and executes the first rule that succeeds.
///
/// Rules naming an ability missing from `env.abilities` are skipped.
///
/// # Errors
///
/// [`ActionError::UnknownActor`] when the actor is not a participant, and
/// [`ActionError::NoRuleMatched`] when every rule failed; the actor then
/// effectively passes.
pub fn choose_and_execute(
    participants: &mut [Combatant],
    actor_id: &str,
    rules: &[AiRule],
    threat: &ThreatTable,
    env: &CombatEnv,
    config: &CombatConfig,
    rng: &mut dyn RandomSource,
) -> Result<AiDecision, ActionError> {
    let actor = index_of(participants, actor_id)
        .ok_or_else(|| ActionError::UnknownActor(actor_id.to_string()))?;

    let mut ctx = TurnContext {
        participants,
        actor,
        threat,
        env,
        config,
        rng,
        targets: Vec::new(),
        decision: None,
    };

    let nodes = rules
        .iter()
        .enumerate()
        .filter_map(|(index, rule)| match env.abilities.get(&rule.ability) {
            Some(ability) => Some(rule_node(index, rule, ability)),
            None => {
                tracing::warn!(actor = actor_id, ability = %rule.ability, "ai rule names unknown ability, skipping");
                None
            }
        })
        .collect();

    if selector(nodes).tick(&mut ctx).is_success() {
        if let Some(decision) = ctx.decision {
            return Ok(decision);
        }
    }
    tracing::debug!(actor = actor_id, "no ai rule fired");
    Err(ActionError::NoRuleMatched)
}
