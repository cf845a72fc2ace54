//! Formula evaluation.

use super::{BinaryOp, Expr, FormulaContext, FormulaError, UnaryOp};

impl Expr {
    /// Evaluates the tree against a context.
    ///
    /// Total: missing variables read as `0.0` and division by zero yields `0.0`.
    pub fn eval(&self, ctx: &FormulaContext) -> f64 {
        match self {
            Expr::Number(value) => *value,
            Expr::Var(name) => ctx.get(name),
            Expr::Unary { op, operand } => {
                let value = operand.eval(ctx);
                match op {
                    UnaryOp::Plus => value,
                    UnaryOp::Neg => -value,
                }
            }
            Expr::Binary { op, left, right } => {
                let lhs = left.eval(ctx);
                let rhs = right.eval(ctx);
                match op {
                    BinaryOp::Add => lhs + rhs,
                    BinaryOp::Sub => lhs - rhs,
                    BinaryOp::Mul => lhs * rhs,
                    BinaryOp::Div => {
                        if rhs == 0.0 {
                            0.0
                        } else {
                            lhs / rhs
                        }
                    }
                }
            }
        }
    }
}

/// Parses and evaluates a formula in one step.
///
/// # Arguments
///
/// * `expr` - Formula source, e.g. `"INT*0.4 + 6"`
/// * `ctx` - Variables visible to the formula
///
/// # Errors
///
/// Propagates any [`FormulaError`] from parsing. Unsafe syntax is always an
/// error here; callers decide whether to fail soft.
pub fn evaluate(expr: &str, ctx: &FormulaContext) -> Result<f64, FormulaError> {
    Ok(Expr::parse(expr)?.eval(ctx))
}

/// Evaluates a content-supplied formula, substituting `fallback` on error.
///
/// Used at call sites where bad content should degrade a single value
/// instead of aborting the turn. The failure is logged at `warn`.
pub fn evaluate_or(expr: &str, ctx: &FormulaContext, fallback: f64) -> f64 {
    match evaluate(expr, ctx) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(expr, %error, fallback, "formula failed to evaluate, using fallback");
            fallback
        }
    }
}
