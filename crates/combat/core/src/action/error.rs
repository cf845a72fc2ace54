//! Rejected actions.

use crate::error::{EngineError, ErrorSeverity};

/// Why an ability, item or AI turn did not execute.
///
/// These are gameplay outcomes, not faults: the AI tries its next rule and
/// the CLI prints [`ActionError::reason`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// Actor id is not a participant.
    #[error("actor {0} is not a participant")]
    UnknownActor(String),

    /// The targeting spec resolved to nobody.
    #[error("no valid target")]
    NoValidTarget,

    /// A supplied target is outside the possible target set.
    #[error("target {0} is not a valid target")]
    InvalidTarget(String),

    #[error("ability {0} is on cooldown")]
    OnCooldown(String),

    /// Named resource below the ability's cost.
    #[error("insufficient {0}")]
    InsufficientResource(String),

    #[error("no {0} left in inventory")]
    NoItem(String),

    #[error("unsupported targeting spec")]
    UnsupportedTargeting,

    #[error("unsupported item kind")]
    UnsupportedItemKind,

    /// An AI rule names an ability missing from the catalog.
    #[error("unknown ability {0}")]
    UnknownAbility(String),

    /// No AI rule passed its requirements and executed.
    #[error("no rule matched or no ability was ready")]
    NoRuleMatched,
}

impl ActionError {
    /// Stable snake-case reason string, e.g. `insufficient_mana`.
    pub fn reason(&self) -> String {
        match self {
            Self::UnknownActor(_) => "unknown_actor".to_string(),
            Self::NoValidTarget => "no_valid_target".to_string(),
            Self::InvalidTarget(_) => "invalid_target".to_string(),
            Self::OnCooldown(_) => "on_cooldown".to_string(),
            Self::InsufficientResource(resource) => format!("insufficient_{resource}"),
            Self::NoItem(_) => "no_item".to_string(),
            Self::UnsupportedTargeting => "unsupported_targeting".to_string(),
            Self::UnsupportedItemKind => "unsupported_item_kind".to_string(),
            Self::UnknownAbility(_) => "unknown_ability".to_string(),
            Self::NoRuleMatched => "no_rule_matched_or_not_ready".to_string(),
        }
    }
}

impl EngineError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            NoValidTarget | OnCooldown(_) | InsufficientResource(_) | NoItem(_) => {
                ErrorSeverity::Recoverable
            }
            NoRuleMatched => ErrorSeverity::Recoverable,
            UnknownActor(_) | InvalidTarget(_) => ErrorSeverity::Validation,
            UnsupportedTargeting | UnsupportedItemKind | UnknownAbility(_) => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            UnknownActor(_) => "ACTION_UNKNOWN_ACTOR",
            NoValidTarget => "ACTION_NO_VALID_TARGET",
            InvalidTarget(_) => "ACTION_INVALID_TARGET",
            OnCooldown(_) => "ACTION_ON_COOLDOWN",
            InsufficientResource(_) => "ACTION_INSUFFICIENT_RESOURCE",
            NoItem(_) => "ACTION_NO_ITEM",
            UnsupportedTargeting => "ACTION_UNSUPPORTED_TARGETING",
            UnsupportedItemKind => "ACTION_UNSUPPORTED_ITEM_KIND",
            UnknownAbility(_) => "ACTION_UNKNOWN_ABILITY",
            NoRuleMatched => "ACTION_NO_RULE_MATCHED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_are_snake_case() {
        assert_eq!(
            ActionError::InsufficientResource("mana".into()).reason(),
            "insufficient_mana"
        );
        assert_eq!(
            ActionError::NoRuleMatched.reason(),
            "no_rule_matched_or_not_ready"
        );
        assert!(ActionError::OnCooldown("fireball".into()).severity().is_recoverable());
        assert!(ActionError::UnsupportedTargeting.severity().is_internal());
    }
}
