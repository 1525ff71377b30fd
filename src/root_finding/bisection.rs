//! Bisection method

use super::algorithms::{Algorithm, GLOBAL_MAX_ITER_FALLBACK};
use super::common::{bisection_theoretical_iter, CountedEval};
use super::config::{CommonCfg, impl_common_cfg};
use super::errors::{RootFindingError, ToleranceError};
use super::history::{History, IterationRecord, Residual, Step};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied};
use super::signs::opposite_sign;
use crate::expression::Evaluate;
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::BISECTION;

#[derive(Debug, Error)]
pub enum BisectionError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid bounds: a and b must be finite. got [{a}, {b}]")]
    InvalidBounds { a: f64, b: f64 },
}

/// Bisection configuration
///
/// # Fields
/// - `common` : [`CommonCfg`] with `delta` and optional `max_iter`.
///
/// # Defaults
/// - If `max_iter` is `None`, [`bisection`] uses the theoretical number of
///   halvings needed to bring `|b - a|` below `delta`, capped at
///   [`GLOBAL_MAX_ITER_FALLBACK`].
#[derive(Debug, Copy, Clone)]
pub struct BisectionCfg {
    common: CommonCfg,
}
impl BisectionCfg {
    #[must_use]
    pub fn new() -> Self {
        Self { common: CommonCfg::new() }
    }
}
impl_common_cfg!(BisectionCfg);

/// Midpoint of [a, b]
#[inline]
fn calculate_bisection(a: f64, b: f64) -> f64 {
    // halves first so brackets near f64::MAX do not overflow
    a / 2.0 + b / 2.0
}

/// Finds a root of a function using the
/// [bisection method](https://en.wikipedia.org/wiki/Bisection_method).
///
/// # Arguments
/// - `func` : function whose root is sought ([`Evaluate`])
/// - `a`    : one end of the bracket; must be finite
/// - `b`    : other end of the bracket; must be finite
/// - `cfg`  : [`BisectionCfg`] (`delta`, optional `max_iter`)
///
/// # Returns
/// [`RootFindingReport`] with
/// - `root`                : midpoint of the last iteration
/// - `tolerance_satisfied` : always [`ToleranceSatisfied::WidthTolReached`]
/// - `history`             : `(k, a, b, midpoint, f(midpoint))` per iteration,
///   with `[a, b]` the bracket *before* that iteration's update
///
/// # Errors
/// - [`BisectionError::InvalidBounds`]          : `a` or `b` is NaN/inf
///
/// * Propagated via [`BisectionError::RootFinding`]
/// - [`RootFindingError::Domain`]               : `f` undefined at an evaluated point
/// - [`RootFindingError::NonConvergence`]       : `max_iter` reached with `|b - a| >= delta`
///
/// # Behavior
/// - If `|a - b| < delta` on entry, returns `a` with an empty history.
/// - Each iteration evaluates `f(m)` at `m = (a + b) / 2`; if `f(a)` and
///   `f(m)` have strictly opposite signs then `b <- m`, else `a <- m`.
/// - Stops once `|a - b| < delta`.
///
/// # Warning
/// - A sign change `f(a) * f(b) < 0` is required for correctness but not
///   enforced; without one the bracket collapses onto an endpoint.
#[tracing::instrument(level = "debug", skip(func, cfg), fields(delta = cfg.delta()))]
pub fn bisection<F>(
    func: F,
    mut a: f64,
    mut b: f64,
    cfg: BisectionCfg
) -> Result<RootFindingReport, BisectionError>
where F: Evaluate {

    if !(a.is_finite() && b.is_finite()) {
        return Err(BisectionError::InvalidBounds { a, b });
    }

    let delta    = cfg.common.delta();
    let num_iter = match cfg.common.max_iter() {
        Some(m) => m,
        None    => bisection_theoretical_iter(a, b, delta).min(GLOBAL_MAX_ITER_FALLBACK),
    };

    // immediate narrow width success
    if (a - b).abs() < delta {
        return Ok(RootFindingReport {
            root                : a,
            iterations          : 0,
            evaluations         : 0,
            termination_reason  : TerminationReason::ToleranceReached,
            tolerance_satisfied : ToleranceSatisfied::WidthTolReached,
            history             : History::with_cap(num_iter),
            algorithm_name      : ALGORITHM.algorithm_name(),
        });
    }

    let mut f = CountedEval::new(func);
    let mut fa = f.eval(a)?;

    // only a diagnostic; a domain error at `b` is left for the iterations to find
    if let Ok(fb) = f.eval(b) {
        if !opposite_sign(fa, fb) {
            tracing::warn!(a, b, fa, fb, "no sign change on bracket; bisection may not find a root");
        }
    }

    // algorithm
    let mut history  = History::with_cap(num_iter);
    let mut midpoint = a;       // gets overwritten
    for iter in 1..=num_iter {
        midpoint = calculate_bisection(a, b);
        let fm   = f.eval(midpoint)?;

        history.push(IterationRecord::new(
            iter,
            Step::Bisection { a, b, midpoint },
            Residual::Value(fm),
        ));
        tracing::trace!(iter, a, b, midpoint, fm, "bisection step");

        // shrink interval
        if opposite_sign(fa, fm) {
            b = midpoint;
        } else {
            a  = midpoint;
            fa = fm;
        }

        // check for width tolerance
        if (a - b).abs() < delta {
            tracing::debug!(iter, root = midpoint, "bisection converged");
            return Ok(RootFindingReport {
                root                : midpoint,
                iterations          : iter,
                evaluations         : f.evals(),
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied : ToleranceSatisfied::WidthTolReached,
                history,
                algorithm_name      : ALGORITHM.algorithm_name(),
            });
        }
    }

    tracing::warn!(num_iter, last = midpoint, "bisection hit iteration limit");
    Err(RootFindingError::NonConvergence {
        algorithm : ALGORITHM,
        max_iter  : num_iter,
        last      : midpoint,
        history,
    }.into())
}
