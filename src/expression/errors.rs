//! Expression error types.
//!
//! ┌ [`ExpressionError`] : the formula itself is unusable
//! │  ├ empty or malformed text
//! │  ├ unknown identifiers / functions
//! │  ├ nesting beyond the parser's depth limit
//! │  └ derivative requested for a non-differentiable form
//! │
//! └ [`DomainError`]     : the formula is undefined at a point
//!    ├ division by zero
//!    ├ logarithm / square root / inverse trig outside their domain
//!    └ any other non-finite result

use std::ops::Range;
use thiserror::Error;

/// Errors raised while compiling an expression or requesting its derivative.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("empty expression")]
    Empty,

    #[error("invalid character {text:?} at {span:?}")]
    InvalidCharacter { text: String, span: Range<usize> },

    #[error("unexpected token {found:?} at {span:?}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        span: Range<usize>,
    },

    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("unknown identifier `{name}` at {span:?}; the only variable is `x`")]
    UnknownIdentifier { name: String, span: Range<usize> },

    #[error("unknown function `{name}` at {span:?}")]
    UnknownFunction { name: String, span: Range<usize> },

    #[error("`{name}` is a function and must be called with an argument")]
    MissingArgument { name: String },

    #[error("`{function}` has no symbolic derivative")]
    NotDifferentiable { function: &'static str },

    #[error("expression nested deeper than {max} levels")]
    TooDeep { max: usize },
}

/// Errors raised when an expression is evaluated outside its domain.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DomainError {
    #[error("division by zero at x={x}")]
    DivisionByZero { x: f64 },

    #[error("`{function}` undefined for argument {arg} at x={x}")]
    OutOfDomain {
        function: &'static str,
        arg: f64,
        x: f64,
    },

    #[error("non-finite value {value} at x={x}")]
    NonFinite { x: f64, value: f64 },
}
