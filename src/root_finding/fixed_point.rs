//! Fixed-point iteration (MIL)

use super::algorithms::Algorithm;
use super::common::CountedEval;
use super::config::{CommonCfg, impl_common_cfg};
use super::errors::{RootFindingError, ToleranceError};
use super::history::{History, IterationRecord, Residual, Step};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied};
use crate::expression::Evaluate;
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::FIXED_POINT;

#[derive(Debug, Error)]
pub enum FixedPointError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid initial guess: x0={x0} must be finite")]
    InvalidGuess { x0: f64 },
}

/// Fixed-point configuration
///
/// # Defaults
/// - If `max_iter` is `None`, [`fixed_point`] resolves it through
///   [`Algorithm::default_max_iter`].
#[derive(Debug, Copy, Clone)]
pub struct FixedPointCfg {
    common: CommonCfg,
}
impl FixedPointCfg {
    #[must_use]
    pub fn new() -> Self {
        Self { common: CommonCfg::new() }
    }
}
impl_common_cfg!(FixedPointCfg);

/// Finds a root of `func` by iterating an equivalent map `x = g(x)`.
///
/// # Arguments
/// - `func` : `f`, used only for the residual `|f(x)|`
/// - `map`  : `g`, an algebraic rearrangement of `f(x) = 0` as `x = g(x)`
/// - `x0`   : finite initial guess
/// - `cfg`  : [`FixedPointCfg`]
///
/// # Returns
/// [`RootFindingReport`] with `root = g(x)` of the last iteration and
/// `(k, x, g(x), f(x))` per iteration.
///
/// # Errors
/// - [`FixedPointError::InvalidGuess`]     : `x0` non-finite
/// - [`RootFindingError::Domain`]          : `f` or `g` undefined at an iterate
/// - [`RootFindingError::NonConvergence`]  : exactly `max_iter` iterations
///   without `|f(x)| < delta` or `|g(x) - x| < delta`
///
/// # Notes
/// - Convergence needs `|g'(x)| < 1` near the root. This is not checked;
///   a divergent map shows up as `NonConvergence`.
#[tracing::instrument(level = "debug", skip(func, map, cfg), fields(delta = cfg.delta()))]
pub fn fixed_point<F, G>(
    func: F,
    map: G,
    x0: f64,
    cfg: FixedPointCfg,
) -> Result<RootFindingReport, FixedPointError>
where
    F: Evaluate,
    G: Evaluate,
{
    if !x0.is_finite() {
        return Err(FixedPointError::InvalidGuess { x0 });
    }

    let delta    = cfg.common.delta();
    let num_iter = cfg.common.resolve_max_iter(ALGORITHM);

    let mut f = CountedEval::new(func);
    let mut g = CountedEval::new(map);

    let mut history = History::with_cap(num_iter);
    let mut x       = x0;
    for iter in 1..=num_iter {
        let fx = f.eval(x)?;
        let gx = g.eval(x)?;

        history.push(IterationRecord::new(
            iter,
            Step::FixedPoint { x, gx },
            Residual::Value(fx),
        ));
        tracing::trace!(iter, x, gx, fx, "fixed-point step");

        let satisfied = if fx.abs() < delta {
            Some(ToleranceSatisfied::ResidualReached)
        } else if (gx - x).abs() < delta {
            Some(ToleranceSatisfied::StepSizeReached)
        } else {
            None
        };

        if let Some(tolerance_satisfied) = satisfied {
            tracing::debug!(iter, root = gx, "fixed point converged");
            return Ok(RootFindingReport {
                root                : gx,
                iterations          : iter,
                evaluations         : f.evals() + g.evals(),
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied,
                history,
                algorithm_name      : ALGORITHM.algorithm_name(),
            });
        }

        x = gx;
    }

    tracing::warn!(num_iter, last = x, "fixed point hit iteration limit");
    Err(RootFindingError::NonConvergence {
        algorithm : ALGORITHM,
        max_iter  : num_iter,
        last      : x,
        history,
    }.into())
}
