//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (`FormulaError`, `ActionError`, `EncounterError`)
//! live next to the operations that produce them. This module holds the
//! pieces they share: a severity classification and the [`EngineError`]
//! trait that exposes it together with a stable error code.
//!
//! Gameplay rejections such as "on cooldown" are ordinary values callers
//! branch on. Only precondition violations (an encounter without
//! participants, a snapshot from another roster) are hard errors.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the actor may pick another ability, target or item
/// - **Validation**: the request itself is malformed for the current state
/// - **Internal**: content or engine data is inconsistent
/// - **Fatal**: the simulation cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Retry with an alternative action.
    ///
    /// Examples: ability on cooldown, not enough mana, item used up
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: target outside the legal target set, unsafe formula
    Validation,

    /// Unexpected content or state inconsistency.
    ///
    /// Examples: unsupported targeting spec, unknown ability id in an AI rule
    Internal,

    /// The encounter cannot be constructed or restored.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates bad content or an engine bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are SCREAMING_SNAKE and never change once published
pub trait EngineError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_predicates() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
