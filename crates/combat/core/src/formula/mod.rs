//! Restricted arithmetic formulas for content-driven values.
//!
//! Damage formulas, crit chances, per-tick status damage and hazard amounts
//! are all strings supplied by content packs, e.g. `"ATT + WPN - ARM*0.6"`.
//! They share this one evaluator.
//!
//! ## Grammar
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | IDENT | '(' expr ')'
//! ```
//!
//! Identifiers resolve from a [`FormulaContext`] and default to `0.0` when
//! absent. Division by zero yields `0.0`. Everything outside the grammar
//! (calls, attribute access, subscripts, comparisons, boolean logic, other
//! operators, string literals, keywords) is rejected with
//! [`FormulaError::Unsafe`] before anything is evaluated.
//!
//! ## Examples
//!
//! ```
//! use combat_core::formula::{evaluate, FormulaContext};
//!
//! let ctx = FormulaContext::new().with("ATT", 10.0).with("WPN", 5.0);
//! assert_eq!(evaluate("ATT + WPN - ARM*0.6", &ctx), Ok(15.0));
//! assert!(evaluate("__import__('os')", &ctx).unwrap_err().is_unsafe());
//! ```

pub mod evaluate;
mod parse;

pub use evaluate::{evaluate, evaluate_or};

use std::collections::BTreeMap;

use crate::error::{EngineError, ErrorSeverity};

// ============================================================================
// Expression Tree
// ============================================================================

/// Binary operators allowed in formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Unary operators allowed in formulas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
}

/// Parsed formula.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Numeric literal (e.g. `0.6`).
    Number(f64),
    /// Context variable (e.g. `ATT`).
    Var(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    /// Parses a formula string.
    ///
    /// # Errors
    ///
    /// [`FormulaError::Unsafe`] for syntax outside the allow-list,
    /// [`FormulaError::Malformed`] for incomplete or unbalanced input and
    /// [`FormulaError::Empty`] for blank input.
    pub fn parse(source: &str) -> Result<Self, FormulaError> {
        parse::Parser::new(source).parse()
    }
}

// ============================================================================
// Evaluation Context
// ============================================================================

/// Named values visible to a formula.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormulaContext {
    vars: BTreeMap<String, f64>,
}

impl FormulaContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable (builder pattern).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.vars.insert(name.into(), value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.vars.insert(name.into(), value);
    }

    /// Looks up a variable, `0.0` when absent.
    pub fn get(&self, name: &str) -> f64 {
        self.vars.get(name).copied().unwrap_or(0.0)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FormulaContext {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Syntax rejected by the allow-list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum UnsafeConstruct {
    AttributeAccess,
    FunctionCall,
    Subscript,
    Comparison,
    BooleanLogic,
    Exponentiation,
    Modulo,
    BitwiseOperator,
    StringLiteral,
    Keyword,
    UnexpectedCharacter,
}

/// Errors raised while parsing a formula.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    #[error("empty expression")]
    Empty,

    /// Syntax outside the arithmetic allow-list.
    #[error("unsafe expression: {construct} at offset {position}")]
    Unsafe {
        construct: UnsafeConstruct,
        position: usize,
    },

    /// Allowed tokens in an invalid arrangement.
    #[error("malformed expression at offset {position}: {reason}")]
    Malformed {
        position: usize,
        reason: &'static str,
    },
}

impl FormulaError {
    /// True when the formula was rejected at the safety boundary.
    pub fn is_unsafe(&self) -> bool {
        matches!(self, Self::Unsafe { .. })
    }
}

impl EngineError for FormulaError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "FORMULA_EMPTY",
            Self::Unsafe { .. } => "FORMULA_UNSAFE",
            Self::Malformed { .. } => "FORMULA_MALFORMED",
        }
    }
}
