//! Expression parsing, evaluation and symbolic differentiation.
//!
//! ```
//! use zeros::expression::Evaluator;
//!
//! let f = Evaluator::compile("x^2 - 2").unwrap();
//! assert_eq!(f.eval(3.0), Ok(7.0));
//! assert_eq!(f.derivative().unwrap().source(), "2 * x");
//! ```

pub mod ast;
pub mod errors;
pub mod evaluator;
pub(crate) mod derivative;
pub(crate) mod lexer;
pub(crate) mod parser;

pub use errors::{DomainError, ExpressionError};
pub use evaluator::{Differentiate, Evaluate, Evaluator};
