use std::collections::BTreeMap;

use super::Definition;
use crate::config::CombatConfig;

/// Who an ability may be aimed at.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetingSpec {
    /// The actor itself.
    #[strum(serialize = "self")]
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    SelfOnly,
    /// One living enemy; the first in participant order when not specified.
    #[default]
    SingleEnemy,
    /// One living enemy picked at random when not specified.
    RandomEnemy,
    /// Every living enemy.
    AllEnemies,
    /// The living ally (actor included) with the lowest hp.
    AllyLowestHp,
    /// Spec not understood by this engine version.
    Unsupported,
}

impl TargetingSpec {
    /// Parses a content string, mapping unknown specs to [`TargetingSpec::Unsupported`].
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or(Self::Unsupported)
    }

    /// True for specs that resolve to at most one target.
    pub fn is_single(&self) -> bool {
        matches!(
            self,
            Self::SelfOnly | Self::SingleEnemy | Self::RandomEnemy | Self::AllyLowestHp
        )
    }
}

/// Whether an ability goes through attack resolution.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityKind {
    /// Rolls hit/crit/damage per target; `on_hit` statuses apply on hits.
    #[default]
    Attack,
    /// Never rolls to hit; `on_hit` statuses apply to every target.
    Support,
}

/// Critical hit parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CritSpec {
    /// Formula for the crit probability, clamped to `[0, 1]`.
    pub chance: String,
    pub multiplier: f64,
}

impl CritSpec {
    pub fn new(chance: impl Into<String>, multiplier: f64) -> Self {
        Self {
            chance: chance.into(),
            multiplier,
        }
    }

    /// A crit spec that never crits.
    pub fn never() -> Self {
        Self::new("0.0", CombatConfig::DEFAULT_CRIT_MULTIPLIER)
    }
}

impl Default for CritSpec {
    fn default() -> Self {
        Self::new(
            CombatConfig::DEFAULT_CRIT_EXPR,
            CombatConfig::DEFAULT_CRIT_MULTIPLIER,
        )
    }
}

/// A status applied with an independent probability.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusApplication {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(default = "StatusApplication::certain"))]
    pub chance: f64,
}

impl StatusApplication {
    pub fn new(id: impl Into<String>, chance: f64) -> Self {
        Self {
            id: id.into(),
            chance,
        }
    }

    fn certain() -> f64 {
        1.0
    }
}

/// Ability definition as supplied by content.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilityDef {
    pub id: String,
    pub name: String,
    pub kind: AbilityKind,
    /// Base damage formula.
    pub formula: String,
    pub damage_type: String,
    pub crit: CritSpec,
    pub targeting: TargetingSpec,
    /// Resource name (`mana`, `hp`) to amount spent on use.
    pub resource_cost: BTreeMap<String, f64>,
    /// Turns the ability stays unavailable after use; `0` for none.
    pub cooldown: u32,
    pub on_hit: Vec<StatusApplication>,
}

impl AbilityDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Fallback attack used when an actor has nothing better to do.
    pub fn basic_attack() -> Self {
        Self::new(CombatConfig::BASIC_ATTACK_ID, "Basic Attack")
    }

    #[must_use]
    pub fn support(mut self) -> Self {
        self.kind = AbilityKind::Support;
        self
    }

    #[must_use]
    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = formula.into();
        self
    }

    #[must_use]
    pub fn with_damage_type(mut self, damage_type: impl Into<String>) -> Self {
        self.damage_type = damage_type.into();
        self
    }

    #[must_use]
    pub fn with_crit(mut self, crit: CritSpec) -> Self {
        self.crit = crit;
        self
    }

    #[must_use]
    pub fn with_targeting(mut self, targeting: TargetingSpec) -> Self {
        self.targeting = targeting;
        self
    }

    #[must_use]
    pub fn with_cost(mut self, resource: impl Into<String>, amount: f64) -> Self {
        self.resource_cost.insert(resource.into(), amount);
        self
    }

    #[must_use]
    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    #[must_use]
    pub fn with_on_hit(mut self, status_id: impl Into<String>, chance: f64) -> Self {
        self.on_hit.push(StatusApplication::new(status_id, chance));
        self
    }
}

impl Default for AbilityDef {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            kind: AbilityKind::default(),
            formula: CombatConfig::DEFAULT_FORMULA.to_string(),
            damage_type: CombatConfig::DEFAULT_DAMAGE_TYPE.to_string(),
            crit: CritSpec::default(),
            targeting: TargetingSpec::default(),
            resource_cost: BTreeMap::new(),
            cooldown: 0,
            on_hit: Vec::new(),
        }
    }
}

impl Definition for AbilityDef {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targeting_parses_content_strings() {
        assert_eq!(TargetingSpec::parse_lenient("self"), TargetingSpec::SelfOnly);
        assert_eq!(
            TargetingSpec::parse_lenient("ally_lowest_hp"),
            TargetingSpec::AllyLowestHp
        );
        assert_eq!(
            TargetingSpec::parse_lenient("cone_of_enemies"),
            TargetingSpec::Unsupported
        );
        assert_eq!(TargetingSpec::AllEnemies.to_string(), "all_enemies");
    }

    #[test]
    fn defaults_match_content_conventions() {
        let ability = AbilityDef::new("slash", "Slash");
        assert_eq!(ability.formula, "ATT + WPN - ARM*0.6");
        assert_eq!(ability.damage_type, "slashing");
        assert_eq!(ability.crit.chance, "0.05");
        assert_eq!(ability.crit.multiplier, 1.5);
        assert_eq!(ability.targeting, TargetingSpec::SingleEnemy);
        assert_eq!(ability.cooldown, 0);
    }
}
