//! Root-finding error types.
//!
//! ┌ [`RootFindingError`] : common runtime errors
//! │   ├ function undefined at an iterate ([`DomainError`])
//! │   ├ invalid global parameters (e.g. max_iter)
//! │   └ iteration cap exhausted without convergence
//! │
//! └ [`ToleranceError`]   : tolerance-related errors
//!     └ invalid input tolerance `delta`
//!
//! Stalls (zero derivative, zero denominator) are *not* errors;
//! they are reported through [`super::report::TerminationReason::Stalled`].


use thiserror::Error;
use crate::expression::DomainError;
use super::algorithms::Algorithm;
use super::history::History;


/// Root-finding runtime errors.
///
/// ┌ Function undefined at an iterate
/// ├ Invalid global configuration (e.g. max_iter < 1)
/// └ Iteration cap reached, partial history attached
#[derive(Debug, Error)]
pub enum RootFindingError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("invalid max_iter: must be >= 1. got max_iter={got}")]
    InvalidMaxIter   { got: usize },

    #[error("{algorithm} did not converge within {max_iter} iterations; last iterate x={last}")]
    NonConvergence {
        algorithm : Algorithm,
        max_iter  : usize,
        last      : f64,
        history   : History,
    },
}

impl RootFindingError {
    /// Iterations recorded before the failure, if the failure kept them.
    pub fn history(&self) -> Option<&History> {
        match self {
            RootFindingError::NonConvergence { history, .. } => Some(history),
            _ => None,
        }
    }
}


/// Tolerance configuration errors.
#[derive(Debug, Error)]
pub enum ToleranceError {
    #[error("invalid `delta` tolerance: must be finite and > 0. got {got}")]
    InvalidDelta { got: f64 },
}
