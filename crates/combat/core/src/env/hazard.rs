use super::{Definition, StatusApplication};

/// Turn phase at which a hazard fires.
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
pub enum Phase {
    #[default]
    StartOfTurn,
    EndOfTurn,
}

/// Which participants a hazard affects.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HazardTargeting {
    /// Locations covered; empty means everywhere.
    pub locations: Vec<String>,
    /// Team filter; `None` means any team.
    pub team: Option<String>,
    /// Participants carrying any of these tags are exempt.
    pub require_tag_absent: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardDamage {
    /// Formula evaluated on the victim's STR/DEX/INT/STA.
    pub amount: String,
    pub damage_type: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HazardEffects {
    pub damage: Option<HazardDamage>,
    pub heal: Option<f64>,
    /// Mana restored.
    pub mana: Option<f64>,
    pub apply_status: Vec<StatusApplication>,
}

/// Environmental hazard definition as supplied by content.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HazardDef {
    pub id: String,
    pub name: String,
    pub phase: Phase,
    /// Rounds the hazard stays active; `0` for persistent.
    pub duration_rounds: u32,
    pub targeting: HazardTargeting,
    pub effects: HazardEffects,
}

impl HazardDef {
    pub fn new(id: impl Into<String>, phase: Phase) -> Self {
        Self {
            id: id.into(),
            phase,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.targeting.locations.push(location.into());
        self
    }

    #[must_use]
    pub fn for_team(mut self, team: impl Into<String>) -> Self {
        self.targeting.team = Some(team.into());
        self
    }

    #[must_use]
    pub fn exempting(mut self, tag: impl Into<String>) -> Self {
        self.targeting.require_tag_absent.push(tag.into());
        self
    }

    #[must_use]
    pub fn lasting(mut self, rounds: u32) -> Self {
        self.duration_rounds = rounds;
        self
    }

    #[must_use]
    pub fn dealing(mut self, amount: impl Into<String>, damage_type: Option<&str>) -> Self {
        self.effects.damage = Some(HazardDamage {
            amount: amount.into(),
            damage_type: damage_type.map(str::to_string),
        });
        self
    }

    #[must_use]
    pub fn healing(mut self, amount: f64) -> Self {
        self.effects.heal = Some(amount);
        self
    }

    #[must_use]
    pub fn restoring_mana(mut self, amount: f64) -> Self {
        self.effects.mana = Some(amount);
        self
    }

    #[must_use]
    pub fn applying(mut self, status_id: impl Into<String>, chance: f64) -> Self {
        self.effects
            .apply_status
            .push(StatusApplication::new(status_id, chance));
        self
    }
}

impl Definition for HazardDef {
    fn id(&self) -> &str {
        &self.id
    }
}
