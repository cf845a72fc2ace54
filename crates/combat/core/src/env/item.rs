use super::{AbilityDef, CritSpec, Definition, TargetingSpec};
use crate::config::CombatConfig;

/// Item behavior family.
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
pub enum ItemKind {
    /// Applied directly to the user or chosen allies.
    #[default]
    Consumable,
    /// Rolled against enemies through attack resolution.
    Throwable,
    /// Kind not understood by this engine version.
    Unsupported,
}

/// Effects of a consumable item, applied per target.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConsumableEffects {
    pub heal_hp: Option<f64>,
    pub restore_mana: Option<f64>,
    pub apply_status: Vec<String>,
    pub cleanse_status: Vec<String>,
}

/// Item definition as supplied by content.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    pub effects: ConsumableEffects,
    /// Throwable damage formula; `INT*0.4 + 6` when absent.
    pub formula: Option<String>,
    pub damage_type: Option<String>,
    /// Throwable targeting; single enemy when absent.
    pub targeting: Option<TargetingSpec>,
}

impl ItemDef {
    pub fn consumable(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Consumable,
            ..Self::default()
        }
    }

    pub fn throwable(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: ItemKind::Throwable,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_heal(mut self, amount: f64) -> Self {
        self.effects.heal_hp = Some(amount);
        self
    }

    #[must_use]
    pub fn with_mana(mut self, amount: f64) -> Self {
        self.effects.restore_mana = Some(amount);
        self
    }

    #[must_use]
    pub fn applying(mut self, status_id: impl Into<String>) -> Self {
        self.effects.apply_status.push(status_id.into());
        self
    }

    #[must_use]
    pub fn cleansing(mut self, status_id: impl Into<String>) -> Self {
        self.effects.cleanse_status.push(status_id.into());
        self
    }

    #[must_use]
    pub fn with_formula(mut self, formula: impl Into<String>, damage_type: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self.damage_type = Some(damage_type.into());
        self
    }

    /// Ability-shaped view of a throwable: id `item:<id>`, never crits.
    pub fn as_ability(&self) -> AbilityDef {
        AbilityDef::new(format!("item:{}", self.id), self.name.clone())
            .with_formula(
                self.formula
                    .as_deref()
                    .unwrap_or(CombatConfig::DEFAULT_THROWABLE_FORMULA),
            )
            .with_damage_type(
                self.damage_type
                    .as_deref()
                    .unwrap_or(CombatConfig::DEFAULT_DAMAGE_TYPE),
            )
            .with_crit(CritSpec::never())
            .with_targeting(self.targeting.unwrap_or_default())
    }
}

impl Definition for ItemDef {
    fn id(&self) -> &str {
        &self.id
    }
}
