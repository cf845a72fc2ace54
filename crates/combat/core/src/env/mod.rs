//! Read-only content definitions.
//!
//! Abilities, items, status effects, body parts, hazards and AI rules arrive
//! already parsed and validated by a loader layer outside this crate. The
//! engine only reads them. [`CombatEnv`] bundles everything an encounter
//! needs so call sites take one reference instead of six.

mod ability;
mod ai;
mod body;
mod hazard;
mod item;
pub mod starter;
mod status;

use std::collections::BTreeMap;

pub use ability::{AbilityDef, AbilityKind, CritSpec, StatusApplication, TargetingSpec};
pub use ai::{AiRequirement, AiRule, TargetSelector};
pub use body::BodyPartConfig;
pub use hazard::{HazardDamage, HazardDef, HazardEffects, HazardTargeting, Phase};
pub use item::{ConsumableEffects, ItemDef, ItemKind};
pub use status::{GuardSpec, StackMode, StatusEffectDef};

/// A definition addressable by id.
pub trait Definition {
    fn id(&self) -> &str;
}

/// Definitions keyed by id, iterated in id order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Catalog<T> {
    entries: BTreeMap<String, T>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: Definition> Catalog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a definition, returning the replaced one.
    pub fn insert(&mut self, definition: T) -> Option<T> {
        self.entries.insert(definition.id().to_string(), definition)
    }

    /// Adds a definition (builder pattern).
    #[must_use]
    pub fn with(mut self, definition: T) -> Self {
        self.insert(definition);
        self
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }
}

impl<T: Definition> FromIterator<T> for Catalog<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for definition in iter {
            catalog.insert(definition);
        }
        catalog
    }
}

/// Everything an encounter reads but never writes.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatEnv {
    pub body_parts: BodyPartConfig,
    pub statuses: Catalog<StatusEffectDef>,
    pub abilities: Catalog<AbilityDef>,
    pub items: Catalog<ItemDef>,
    pub hazards: Vec<HazardDef>,
    /// Default rule list for combatants without their own profile.
    pub ai_rules: Vec<AiRule>,
}

impl CombatEnv {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_body_parts(mut self, body_parts: BodyPartConfig) -> Self {
        self.body_parts = body_parts;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: StatusEffectDef) -> Self {
        self.statuses.insert(status);
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability: AbilityDef) -> Self {
        self.abilities.insert(ability);
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: ItemDef) -> Self {
        self.items.insert(item);
        self
    }

    #[must_use]
    pub fn with_hazard(mut self, hazard: HazardDef) -> Self {
        self.hazards.push(hazard);
        self
    }

    #[must_use]
    pub fn with_ai_rules(mut self, rules: Vec<AiRule>) -> Self {
        self.ai_rules = rules;
        self
    }

    /// The configured basic attack, or the built-in default.
    pub fn basic_attack(&self) -> AbilityDef {
        self.abilities
            .get(crate::config::CombatConfig::BASIC_ATTACK_ID)
            .cloned()
            .unwrap_or_else(AbilityDef::basic_attack)
    }
}
