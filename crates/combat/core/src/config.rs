/// Combat tuning constants and runtime-tunable parameters.
///
/// Every probability and clamp used by resolution, effects and threat
/// bookkeeping is read from here, so an [`crate::Encounter`] carries exactly
/// one source of balance numbers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    /// Hit chance before the DEX difference is applied.
    pub base_hit_chance: f64,
    /// Hit chance added per point of attacker DEX over target DEX.
    pub hit_chance_per_dex: f64,
    pub min_hit_chance: f64,
    pub max_hit_chance: f64,
    /// Crit chance used when an ability has no crit expression or it fails to evaluate.
    pub default_crit_chance: f64,
    pub default_crit_multiplier: f64,
    /// Upper bound applied to every resistance at the point of use.
    pub resist_cap: f64,
    /// Tolerance used when comparing resources against costs and thresholds.
    pub resource_epsilon: f64,
    pub threat_cap: f64,
    /// Threat multiplier applied when the hit was a crit.
    pub crit_threat_multiplier: f64,
    pub threat_decay: f64,
}

impl CombatConfig {
    // ===== content defaults =====
    pub const DEFAULT_DAMAGE_TYPE: &'static str = "slashing";
    pub const DEFAULT_FORMULA: &'static str = "ATT + WPN - ARM*0.6";
    pub const DEFAULT_THROWABLE_FORMULA: &'static str = "INT*0.4 + 6";
    pub const DEFAULT_CRIT_EXPR: &'static str = "0.05";
    pub const DEFAULT_BODY_GROUP: &'static str = "humanoid";
    /// Body part reported when the target's group defines no parts.
    pub const FALLBACK_BODY_PART: &'static str = "body";
    pub const BASIC_ATTACK_ID: &'static str = "basic_attack";

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BASE_HIT_CHANCE: f64 = 0.75;
    pub const DEFAULT_HIT_CHANCE_PER_DEX: f64 = 0.01;
    pub const DEFAULT_MIN_HIT_CHANCE: f64 = 0.15;
    pub const DEFAULT_MAX_HIT_CHANCE: f64 = 0.95;
    pub const DEFAULT_CRIT_CHANCE: f64 = 0.05;
    pub const DEFAULT_CRIT_MULTIPLIER: f64 = 1.5;
    pub const DEFAULT_RESIST_CAP: f64 = 0.95;
    pub const DEFAULT_RESOURCE_EPSILON: f64 = 1e-9;
    pub const DEFAULT_THREAT_CAP: f64 = 9999.0;
    pub const DEFAULT_CRIT_THREAT_MULTIPLIER: f64 = 1.25;
    pub const DEFAULT_THREAT_DECAY: f64 = 0.9;

    pub fn new() -> Self {
        Self {
            base_hit_chance: Self::DEFAULT_BASE_HIT_CHANCE,
            hit_chance_per_dex: Self::DEFAULT_HIT_CHANCE_PER_DEX,
            min_hit_chance: Self::DEFAULT_MIN_HIT_CHANCE,
            max_hit_chance: Self::DEFAULT_MAX_HIT_CHANCE,
            default_crit_chance: Self::DEFAULT_CRIT_CHANCE,
            default_crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            resist_cap: Self::DEFAULT_RESIST_CAP,
            resource_epsilon: Self::DEFAULT_RESOURCE_EPSILON,
            threat_cap: Self::DEFAULT_THREAT_CAP,
            crit_threat_multiplier: Self::DEFAULT_CRIT_THREAT_MULTIPLIER,
            threat_decay: Self::DEFAULT_THREAT_DECAY,
        }
    }

    /// Sets the hit chance clamp. Bounds given in either order are sorted.
    #[must_use]
    pub fn with_hit_chance_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_hit_chance = min.min(max);
        self.max_hit_chance = max.max(min);
        self
    }

    #[must_use]
    pub fn with_threat_cap(mut self, cap: f64) -> Self {
        self.threat_cap = cap;
        self
    }

    #[must_use]
    pub fn with_resist_cap(mut self, cap: f64) -> Self {
        self.resist_cap = cap;
        self
    }

    /// Clamps a raw resistance into `[0, resist_cap]`.
    pub fn clamp_resist(&self, raw: f64) -> f64 {
        raw.clamp(0.0, self.resist_cap.max(0.0))
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
