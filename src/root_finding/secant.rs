//! Secant method

use super::algorithms::Algorithm;
use super::common::CountedEval;
use super::config::{CommonCfg, impl_common_cfg};
use super::errors::{RootFindingError, ToleranceError};
use super::history::{History, IterationRecord, Residual, StallReason, Step};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied};
use crate::expression::Evaluate;
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::SECANT;

#[derive(Debug, Error)]
pub enum SecantError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid initial guesses: x0 and x1 must be finite. got x0={x0}, x1={x1}")]
    InvalidGuess { x0: f64, x1: f64 },

    #[error("secant step non-finite from x0={x0}, x1={x1}")]
    StepNotFinite { x0: f64, x1: f64 },
}


/// Secant configuration
///
/// # Fields
/// - `common` : [`CommonCfg`] with `delta` and optional `max_iter`.
///
/// # Defaults
/// - If `common.max_iter` is `None`, [`secant`] resolves it using
///   [`Algorithm::default_max_iter`].
#[derive(Debug, Copy, Clone)]
pub struct SecantCfg {
    common: CommonCfg,
}
impl SecantCfg {
    #[must_use]
    pub fn new() -> Self {
        Self { common: CommonCfg::new() }
    }
}
impl_common_cfg!(SecantCfg);


/// x-intercept of the line through `(x0, fx0)` and `(x1, fx1)`.
///
/// `None` when `fx1 == fx0` and the line has no intercept.
#[inline]
pub(crate) fn calculate_secant_x_intercept(
    (x0, fx0): (f64, f64),
    (x1, fx1): (f64, f64),
) -> Option<f64> {
    let denom = fx1 - fx0;
    if denom == 0.0 {
        return None;
    }
    Some(x1 - fx1 * (x1 - x0) / denom)
}


/// Finds a root of `func` using the
/// [secant method](https://en.wikipedia.org/wiki/Secant_method).
///
/// # Arguments
/// - `func` : function whose root is sought
/// - `x0`   : first initial guess
/// - `x1`   : second initial guess
/// - `cfg`  : [`SecantCfg`]
///
/// # Returns
/// [`RootFindingReport`] with `root = x2` of the last iteration and
/// `(k, x0, x1, x2, f(x2))` per iteration.
///
/// # Errors
/// - [`SecantError::InvalidGuess`]        : `x0` or `x1` non-finite
/// - [`SecantError::StepNotFinite`]       : `x2` overflowed
///
/// * Propagated via [`SecantError::RootFinding`]
/// - [`RootFindingError::Domain`]         : `f` undefined at a point
/// - [`RootFindingError::NonConvergence`] : `max_iter` iterations without
///   `|x2 - x1| < delta` or `|f(x2)| < delta`
///
/// # Behavior
/// - `f(x1) == f(x0)` is a stall: the record carries the stall marker,
///   `x1` is returned with [`StallReason::ZeroDenominator`].
/// - Each function value is evaluated once; the window slides
///   `(x0, x1) <- (x1, x2)` together with its cached values.
#[tracing::instrument(level = "debug", skip(func, cfg), fields(delta = cfg.delta()))]
pub fn secant<F>(
    func: F,
    mut x0: f64,
    mut x1: f64,
    cfg: SecantCfg,
) -> Result<RootFindingReport, SecantError>
where F: Evaluate {

    if !(x0.is_finite() && x1.is_finite()) {
        return Err(SecantError::InvalidGuess { x0, x1 });
    }

    let delta    = cfg.common.delta();
    let num_iter = cfg.common.resolve_max_iter(ALGORITHM);

    let mut f   = CountedEval::new(func);
    let mut fx0 = f.eval(x0)?;
    let mut fx1 = f.eval(x1)?;

    let mut history = History::with_cap(num_iter);
    for iter in 1..=num_iter {
        let Some(x2) = calculate_secant_x_intercept((x0, fx0), (x1, fx1)) else {
            history.push(IterationRecord::new(
                iter,
                Step::Secant { x0, x1, x2: None },
                Residual::Stall(StallReason::ZeroDenominator),
            ));
            tracing::warn!(iter, x0, x1, fx1, "secant stalled on equal function values");
            return Ok(RootFindingReport {
                root                : x1,
                iterations          : iter,
                evaluations         : f.evals(),
                termination_reason  : TerminationReason::Stalled(StallReason::ZeroDenominator),
                tolerance_satisfied : ToleranceSatisfied::ToleranceNotReached,
                history,
                algorithm_name      : ALGORITHM.algorithm_name(),
            });
        };
        if !x2.is_finite() {
            return Err(SecantError::StepNotFinite { x0, x1 });
        }

        let fx2 = f.eval(x2)?;
        history.push(IterationRecord::new(
            iter,
            Step::Secant { x0, x1, x2: Some(x2) },
            Residual::Value(fx2),
        ));
        tracing::trace!(iter, x0, x1, x2, fx2, "secant step");

        let satisfied = if (x2 - x1).abs() < delta {
            Some(ToleranceSatisfied::StepSizeReached)
        } else if fx2.abs() < delta {
            Some(ToleranceSatisfied::ResidualReached)
        } else {
            None
        };

        if let Some(tolerance_satisfied) = satisfied {
            tracing::debug!(iter, root = x2, "secant converged");
            return Ok(RootFindingReport {
                root                : x2,
                iterations          : iter,
                evaluations         : f.evals(),
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied,
                history,
                algorithm_name      : ALGORITHM.algorithm_name(),
            });
        }

        // slide window
        (x0, fx0) = (x1, fx1);
        (x1, fx1) = (x2, fx2);
    }

    tracing::warn!(num_iter, last = x1, "secant hit iteration limit");
    Err(RootFindingError::NonConvergence {
        algorithm : ALGORITHM,
        max_iter  : num_iter,
        last      : x1,
        history,
    }.into())
}
