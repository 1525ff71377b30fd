//! Compiled expressions and the evaluation seam used by the solvers.

use std::fmt;

use super::ast::Expr;
use super::derivative::differentiate;
use super::errors::{DomainError, ExpressionError};
use super::parser::parse;

/// Something that maps a real number to a real number, or fails.
///
/// Implemented by [`Evaluator`] and by every `Fn(f64) -> f64` closure, so the
/// solvers accept parsed expressions and plain Rust functions alike.
pub trait Evaluate {
    fn eval(&self, x: f64) -> Result<f64, DomainError>;
}

/// An [`Evaluate`] that can also provide its first derivative.
pub trait Differentiate: Evaluate {
    type Derivative: Evaluate;

    fn derivative(&self) -> Result<Self::Derivative, ExpressionError>;
}

/// Closures are checked for finiteness the same way parsed expressions are.
impl<F> Evaluate for F
where
    F: Fn(f64) -> f64,
{
    fn eval(&self, x: f64) -> Result<f64, DomainError> {
        let value = self(x);
        if !value.is_finite() {
            return Err(DomainError::NonFinite { x, value });
        }
        Ok(value)
    }
}

/// A real-valued expression in `x`, compiled once from text.
///
/// Immutable after construction; cloning is cheap enough for one instance
/// per solver run and instances can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluator {
    source: String,
    expr: Expr,
}

impl Evaluator {
    /// Parses `text` into an evaluator.
    ///
    /// # Errors
    /// - [`ExpressionError::Empty`] if `text` is blank
    /// - any other [`ExpressionError`] if `text` is not a valid expression in `x`
    pub fn compile(text: &str) -> Result<Self, ExpressionError> {
        let expr = parse(text)?;
        Ok(Self {
            source: text.trim().to_string(),
            expr,
        })
    }

    /// Evaluates the expression at `x`.
    pub fn eval(&self, x: f64) -> Result<f64, DomainError> {
        self.expr.eval(x)
    }

    /// Symbolic first derivative as a new evaluator.
    ///
    /// The derivative's `source` is the printed form of the simplified tree.
    pub fn derivative(&self) -> Result<Evaluator, ExpressionError> {
        let expr = differentiate(&self.expr)?;
        Ok(Self {
            source: expr.to_string(),
            expr,
        })
    }

    /// Text the evaluator was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl Evaluate for Evaluator {
    fn eval(&self, x: f64) -> Result<f64, DomainError> {
        Evaluator::eval(self, x)
    }
}

impl Differentiate for Evaluator {
    type Derivative = Evaluator;

    fn derivative(&self) -> Result<Evaluator, ExpressionError> {
        Evaluator::derivative(self)
    }
}

impl fmt::Display for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
