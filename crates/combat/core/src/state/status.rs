//! Active status instances.

/// One status effect attached to a combatant.
///
/// `remaining` counts the owner's turns left; `stacks` is at least 1 and
/// never exceeds the definition's `max_stacks`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusInstance {
    pub id: String,
    /// Combatant (or `hazard:<id>`) that applied the status.
    pub source_id: Option<String>,
    pub remaining: u32,
    pub stacks: u32,
}

impl StatusInstance {
    pub fn new(id: impl Into<String>, source_id: Option<String>, remaining: u32) -> Self {
        Self {
            id: id.into(),
            source_id,
            remaining,
            stacks: 1,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}
