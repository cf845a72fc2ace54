use super::Definition;

/// How re-applying an active status behaves.
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
pub enum StackMode {
    /// Reset `remaining` to the full duration; stacks unchanged.
    #[default]
    Refresh,
    /// Add a stack (up to `max_stacks`) and keep the longer of the two durations.
    Add,
}

/// Absorbs part of the next landed hit, then the status is consumed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuardSpec {
    /// Fraction of incoming damage removed, clamped to `[0, 1]`.
    pub reduction: f64,
}

/// Status effect definition as supplied by content.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatusEffectDef {
    pub id: String,
    pub name: String,
    /// Turns a fresh application lasts.
    pub duration: u32,
    pub max_stacks: u32,
    pub stack_mode: StackMode,
    /// Damage formula evaluated on the owner's stats at the start of each of its turns.
    pub per_tick: Option<String>,
    pub damage_type: Option<String>,
    pub guard: Option<GuardSpec>,
    /// The instance's `source_id` becomes the owner's forced target.
    pub taunt: bool,
}

impl StatusEffectDef {
    pub fn new(id: impl Into<String>, duration: u32) -> Self {
        Self {
            id: id.into(),
            duration,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn stacking(mut self, max_stacks: u32) -> Self {
        self.stack_mode = StackMode::Add;
        self.max_stacks = max_stacks;
        self
    }

    #[must_use]
    pub fn with_max_stacks(mut self, max_stacks: u32) -> Self {
        self.max_stacks = max_stacks;
        self
    }

    #[must_use]
    pub fn with_tick(mut self, per_tick: impl Into<String>, damage_type: impl Into<String>) -> Self {
        self.per_tick = Some(per_tick.into());
        self.damage_type = Some(damage_type.into());
        self
    }

    #[must_use]
    pub fn with_guard(mut self, reduction: f64) -> Self {
        self.guard = Some(GuardSpec { reduction });
        self
    }

    #[must_use]
    pub fn taunting(mut self) -> Self {
        self.taunt = true;
        self
    }

    /// `max_stacks` with the floor of one stack applied.
    pub fn stack_cap(&self) -> u32 {
        self.max_stacks.max(1)
    }
}

impl Default for StatusEffectDef {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            duration: 1,
            max_stacks: 1,
            stack_mode: StackMode::Refresh,
            per_tick: None,
            damage_type: None,
            guard: None,
            taunt: false,
        }
    }
}

impl Definition for StatusEffectDef {
    fn id(&self) -> &str {
        &self.id
    }
}
