//! Deterministic, data-driven turn-based combat.
//!
//! `combat-core` resolves abilities, items, status effects, hazards and AI
//! decisions for a set of [`Combatant`]s. Content (abilities, statuses,
//! items, hazards, AI rules) arrives pre-parsed as a [`CombatEnv`]; the
//! engine only reads it. Every random decision draws from a caller-supplied
//! [`RandomSource`], so a seeded [`Encounter`] replays bit-identically and
//! can be snapshotted and restored mid-fight.
//!
//! Layering, bottom-up: [`rng`] and [`formula`], then [`state`] and [`env`],
//! then [`combat`] (hit/crit/damage resolution) and [`effect`] (statuses),
//! then [`action`] (abilities and items), [`hazard`], [`threat`] and [`ai`],
//! with [`engine`] orchestrating turns on top.
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod formula;
pub mod hazard;
pub mod rng;
pub mod state;
pub mod threat;

pub use action::{ActionError, ActionReport, ActionSource, can_use_ability, execute_ability, use_item};
pub use ai::{AiDecision, choose_and_execute};
pub use combat::{AttackResult, resolve_attack};
pub use config::CombatConfig;
pub use engine::{
    Encounter, EncounterError, EncounterOutcome, EncounterSnapshot, SNAPSHOT_VERSION, TurnAction,
    TurnReport,
};
pub use env::{
    AbilityDef, AbilityKind, AiRequirement, AiRule, BodyPartConfig, Catalog, CombatEnv, CritSpec,
    HazardDef, ItemDef, ItemKind, Phase, StackMode, StatusApplication, StatusEffectDef,
    TargetSelector, TargetingSpec,
};
pub use error::{EngineError, ErrorSeverity};
pub use event::{CombatEvent, HazardEventKind};
pub use formula::{FormulaContext, FormulaError, evaluate, evaluate_or};
pub use hazard::Environment;
pub use rng::{Pcg32, RandomSource, RngError, RngState, ScriptedRandom};
pub use state::{Combatant, StatValue, StatusInstance};
pub use threat::ThreatTable;
