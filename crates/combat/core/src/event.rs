//! Typed combat events.
//!
//! Every ability use, item use, status tick and hazard phase reports what
//! happened as a list of [`CombatEvent`]s. Narration and logging consume
//! them; the engine never renders text. With the `serde` feature each event
//! serializes as a flat map whose `type` field names the variant.

/// What a hazard did to a participant.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum HazardEventKind {
    Damage,
    Heal,
    Resource,
    Effect,
}

/// One observable outcome.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum CombatEvent {
    /// An attack landed. `amount` is after guard reduction.
    Hit {
        actor_id: String,
        target_id: String,
        ability_id: Option<String>,
        item_id: Option<String>,
        amount: f64,
        dtype: String,
        crit: bool,
        body_part: String,
    },
    Miss {
        actor_id: String,
        target_id: String,
        ability_id: Option<String>,
        item_id: Option<String>,
    },
    /// A status was applied or refreshed.
    Effect {
        actor_id: Option<String>,
        target_id: String,
        effect_id: String,
        ability_id: Option<String>,
        item_id: Option<String>,
    },
    Heal {
        actor_id: Option<String>,
        target_id: String,
        amount: f64,
    },
    Mana {
        actor_id: Option<String>,
        target_id: String,
        amount: f64,
    },
    Cleanse {
        actor_id: Option<String>,
        target_id: String,
        effect_id: String,
    },
    Hazard {
        hazard_id: String,
        target_id: String,
        kind: HazardEventKind,
        amount: f64,
        dtype: Option<String>,
        effect_id: Option<String>,
    },
    /// Periodic status damage at the start of the owner's turn.
    Dot {
        target_id: String,
        effect_id: String,
        amount: f64,
        dtype: String,
    },
    /// A guard status absorbed part of a hit and was consumed.
    GuardBlock {
        actor_id: Option<String>,
        target_id: String,
        effect_id: String,
        reduced: f64,
    },
}

impl CombatEvent {
    /// The `type` discriminator.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Hit { .. } => "hit",
            Self::Miss { .. } => "miss",
            Self::Effect { .. } => "effect",
            Self::Heal { .. } => "heal",
            Self::Mana { .. } => "mana",
            Self::Cleanse { .. } => "cleanse",
            Self::Hazard { .. } => "hazard",
            Self::Dot { .. } => "dot",
            Self::GuardBlock { .. } => "guard_block",
        }
    }

    pub fn target_id(&self) -> &str {
        match self {
            Self::Hit { target_id, .. }
            | Self::Miss { target_id, .. }
            | Self::Effect { target_id, .. }
            | Self::Heal { target_id, .. }
            | Self::Mana { target_id, .. }
            | Self::Cleanse { target_id, .. }
            | Self::Hazard { target_id, .. }
            | Self::Dot { target_id, .. }
            | Self::GuardBlock { target_id, .. } => target_id,
        }
    }

    pub fn actor_id(&self) -> Option<&str> {
        match self {
            Self::Hit { actor_id, .. } | Self::Miss { actor_id, .. } => Some(actor_id.as_str()),
            Self::Effect { actor_id, .. }
            | Self::Heal { actor_id, .. }
            | Self::Mana { actor_id, .. }
            | Self::Cleanse { actor_id, .. }
            | Self::GuardBlock { actor_id, .. } => actor_id.as_deref(),
            Self::Hazard { .. } | Self::Dot { .. } => None,
        }
    }

    /// True for `hit` and `miss`.
    pub fn is_attack_roll(&self) -> bool {
        matches!(self, Self::Hit { .. } | Self::Miss { .. })
    }
}
