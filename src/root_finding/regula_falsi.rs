//! Regula falsi (false position) method

use super::algorithms::Algorithm;
use super::common::CountedEval;
use super::config::{CommonCfg, impl_common_cfg};
use super::errors::{RootFindingError, ToleranceError};
use super::history::{History, IterationRecord, Residual, StallReason, Step};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied};
use super::signs::opposite_sign;
use crate::expression::Evaluate;
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::REGULA_FALSI;

#[derive(Debug, Error)]
pub enum RegulaFalsiError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid bounds: a and b must be finite. got [{a}, {b}]")]
    InvalidBounds { a: f64, b: f64 },

    #[error("interpolated point non-finite on [{a}, {b}]")]
    StepNotFinite { a: f64, b: f64 },
}

/// RegulaFalsi configuration
///
/// ┌ `delta`    : threshold on `|f(c)|` and on the bracket width
/// └ `max_iter` : defaults to [`Algorithm::default_max_iter`]
#[derive(Debug, Copy, Clone)]
pub struct RegulaFalsiCfg {
    common: CommonCfg,
}
impl RegulaFalsiCfg {
    #[must_use]
    pub fn new() -> Self {
        Self { common: CommonCfg::new() }
    }
}
impl_common_cfg!(RegulaFalsiCfg);


/// Interpolated point `(a f(b) - b f(a)) / (f(b) - f(a))`, `None` if `f(a) == f(b)`.
#[inline]
fn calculate_false_position(a: f64, fa: f64, b: f64, fb: f64) -> Option<f64> {
    let denom = fb - fa;
    if denom == 0.0 {
        return None;
    }
    Some((a * fb - b * fa) / denom)
}


/// Finds a root of `func` in a bracket using the
/// [regula falsi method](https://en.wikipedia.org/wiki/Regula_falsi).
///
/// # Arguments
/// - `func` : function whose root is sought
/// - `a`    : one end of the bracket; must be finite
/// - `b`    : other end of the bracket; must be finite
/// - `cfg`  : [`RegulaFalsiCfg`]
///
/// # Returns
/// [`RootFindingReport`] with `root = c` of the last iteration and
/// `(k, a, b, c, f(c))` per iteration, `[a, b]` taken before the update.
///
/// # Errors
/// - [`RegulaFalsiError::InvalidBounds`]  : `a` or `b` non-finite
/// - [`RegulaFalsiError::StepNotFinite`]  : `c` overflowed
///
/// * Propagated via [`RegulaFalsiError::RootFinding`]
/// - [`RootFindingError::Domain`]         : `f` undefined at a point
/// - [`RootFindingError::NonConvergence`] : `max_iter` iterations without
///   `|f(c)| < delta` or `|b - a| < delta`
///
/// # Behavior
/// - `f(a)` and `f(b)` are evaluated once and then carried with the bracket.
/// - `f(a) == f(b)` is a stall: the record carries the stall marker and the
///   last interpolated point is returned, or `a` if there is none yet.
/// - Bracket update mirrors bisection with `c` in place of the midpoint:
///   `b <- c` on a strict sign change between `f(a)` and `f(c)`, else `a <- c`.
#[tracing::instrument(level = "debug", skip(func, cfg), fields(delta = cfg.delta()))]
pub fn regula_falsi<F>(
    func: F,
    mut a: f64,
    mut b: f64,
    cfg: RegulaFalsiCfg,
) -> Result<RootFindingReport, RegulaFalsiError>
where F: Evaluate {

    if !(a.is_finite() && b.is_finite()) {
        return Err(RegulaFalsiError::InvalidBounds { a, b });
    }

    let delta    = cfg.common.delta();
    let num_iter = cfg.common.resolve_max_iter(ALGORITHM);

    let mut f  = CountedEval::new(func);
    let mut fa = f.eval(a)?;
    let mut fb = f.eval(b)?;
    if !opposite_sign(fa, fb) {
        tracing::warn!(a, b, fa, fb, "no sign change on bracket; regula falsi may not find a root");
    }

    let mut history = History::with_cap(num_iter);
    let mut last    = a;
    for iter in 1..=num_iter {
        let Some(c) = calculate_false_position(a, fa, b, fb) else {
            history.push(IterationRecord::new(
                iter,
                Step::FalsePosition { a, b, x: None },
                Residual::Stall(StallReason::ZeroDenominator),
            ));
            tracing::warn!(iter, a, b, fa, "regula falsi stalled on equal function values");
            return Ok(RootFindingReport {
                root                : last,
                iterations          : iter,
                evaluations         : f.evals(),
                termination_reason  : TerminationReason::Stalled(StallReason::ZeroDenominator),
                tolerance_satisfied : ToleranceSatisfied::ToleranceNotReached,
                history,
                algorithm_name      : ALGORITHM.algorithm_name(),
            });
        };
        if !c.is_finite() {
            return Err(RegulaFalsiError::StepNotFinite { a, b });
        }

        let fc = f.eval(c)?;
        history.push(IterationRecord::new(
            iter,
            Step::FalsePosition { a, b, x: Some(c) },
            Residual::Value(fc),
        ));
        tracing::trace!(iter, a, b, c, fc, "regula falsi step");
        last = c;

        let satisfied = if fc.abs() < delta {
            Some(ToleranceSatisfied::ResidualReached)
        } else if (b - a).abs() < delta {
            Some(ToleranceSatisfied::WidthTolReached)
        } else {
            None
        };

        if let Some(tolerance_satisfied) = satisfied {
            tracing::debug!(iter, root = c, "regula falsi converged");
            return Ok(RootFindingReport {
                root                : c,
                iterations          : iter,
                evaluations         : f.evals(),
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied,
                history,
                algorithm_name      : ALGORITHM.algorithm_name(),
            });
        }

        // shrink interval
        if opposite_sign(fa, fc) {
            b  = c;
            fb = fc;
        } else {
            a  = c;
            fa = fc;
        }
    }

    tracing::warn!(num_iter, last, "regula falsi hit iteration limit");
    Err(RootFindingError::NonConvergence {
        algorithm : ALGORITHM,
        max_iter  : num_iter,
        last,
        history,
    }.into())
}
