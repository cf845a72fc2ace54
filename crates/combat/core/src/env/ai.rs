/// How an AI rule picks its targets.
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
pub enum TargetSelector {
    #[strum(serialize = "self")]
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    SelfOnly,
    /// The enemy with the most threat toward the actor; first enemy on ties.
    #[default]
    HighestThreat,
    LowestHpEnemy,
    RandomEnemy,
    AllEnemies,
}

/// Conditions that must all hold for a rule to fire. Unset fields always pass.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiRequirement {
    pub self_hp_le: Option<f64>,
    pub self_mana_ge: Option<f64>,
    /// Checked against the first selected target.
    pub target_hp_le: Option<f64>,
    /// The rule's ability must be off cooldown and affordable.
    pub ability_ready: bool,
    pub self_status_absent: Vec<String>,
    pub self_status_present: Vec<String>,
}

/// One entry of an ordered AI rule list.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiRule {
    pub ability: String,
    pub target: TargetSelector,
    pub require: AiRequirement,
}

impl AiRule {
    pub fn new(ability: impl Into<String>, target: TargetSelector) -> Self {
        Self {
            ability: ability.into(),
            target,
            require: AiRequirement::default(),
        }
    }

    #[must_use]
    pub fn when_hp_at_most(mut self, hp: f64) -> Self {
        self.require.self_hp_le = Some(hp);
        self
    }

    #[must_use]
    pub fn when_mana_at_least(mut self, mana: f64) -> Self {
        self.require.self_mana_ge = Some(mana);
        self
    }

    #[must_use]
    pub fn when_target_hp_at_most(mut self, hp: f64) -> Self {
        self.require.target_hp_le = Some(hp);
        self
    }

    #[must_use]
    pub fn when_ready(mut self) -> Self {
        self.require.ability_ready = true;
        self
    }

    #[must_use]
    pub fn without_status(mut self, status_id: impl Into<String>) -> Self {
        self.require.self_status_absent.push(status_id.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status_id: impl Into<String>) -> Self {
        self.require.self_status_present.push(status_id.into());
        self
    }
}
