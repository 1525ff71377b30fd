//! Newton-Raphson method

use super::algorithms::Algorithm;
use super::common::CountedEval;
use super::config::{CommonCfg, impl_common_cfg};
use super::errors::{RootFindingError, ToleranceError};
use super::history::{History, IterationRecord, Residual, StallReason, Step};
use super::report::{RootFindingReport, TerminationReason, ToleranceSatisfied};
use crate::expression::{Differentiate, Evaluate, ExpressionError};
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::NEWTON;

#[derive(Debug, Error)]
pub enum NewtonError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error("invalid initial guess: x0={x0} must be finite")]
    InvalidGuess { x0: f64 },

    #[error("step non-finite at x={x}, step={step}; x + step undefined")]
    StepNotFinite { x: f64, step: f64 },

    #[error("derivative non-finite at x={x}, f'(x)={dfx}")]
    DerivativeNotFinite { x: f64, dfx: f64 },

    #[error("finite-difference step not representable at x={x}, h={h};\
             try smaller |x| scaling or analytic derivative"
    )]
    FiniteDifferenceStepUnrepresentable { x: f64, h: f64 },
}


/// Newton configuration.
///
/// # Fields
/// - `common` : [`CommonCfg`] with `delta` and optional `max_iter`.
///
/// # Defaults
/// - If `common.max_iter` is `None`, [`newton`] resolves it using
///   [`Algorithm::default_max_iter`].
#[derive(Debug, Copy, Clone)]
pub struct NewtonCfg {
    common: CommonCfg,
}
impl NewtonCfg {
    #[must_use]
    pub fn new() -> Self {
        Self { common: CommonCfg::new() }
    }
}
impl_common_cfg!(NewtonCfg);


/// ULP helpers for finite-difference fallback near representability edges
#[inline]
fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY { return x; }
    // smallest positive subnormal
    if x == 0.0 { return f64::from_bits(1); }

    let bits   = x.to_bits();
    let bumped = if x > 0.0 { bits + 1 } else { bits - 1 };
    f64::from_bits(bumped)
}
#[inline]
fn next_down(x: f64) -> f64 {
    if x.is_nan() || x == f64::NEG_INFINITY { return x; }
    // largest negative subnormal
    if x == 0.0 { return -f64::from_bits(1); }

    let bits   = x.to_bits();
    let bumped = if x > 0.0 { bits - 1 } else { bits + 1 };
    f64::from_bits(bumped)
}


/// Central finite-difference `f'(x)` with ULP rescue.
fn eval_dfx_fd<F>(f: &mut CountedEval<F>, x: f64) -> Result<f64, NewtonError>
where F: Evaluate {
    let mut h  = f64::EPSILON.cbrt() * x.abs().max(1.0);
    let mut xp = x + h;
    let mut xm = x - h;

    // try rescue if representability collapses
    if !xp.is_finite() || !xm.is_finite() || xp == x || xm == x {
        xp = next_up(x);
        xm = next_down(x);
        h  = 0.5 * (xp - xm);

        if !xp.is_finite() || !xm.is_finite() || xp == x || xm == x {
            return Err(NewtonError::FiniteDifferenceStepUnrepresentable { x, h });
        }
    }

    let fxp = f.eval(xp)?;
    let fxm = f.eval(xm)?;
    let dfx = (fxp - fxm) / (2.0 * h);
    if !dfx.is_finite() {
        return Err(NewtonError::DerivativeNotFinite { x, dfx });
    }

    Ok(dfx)
}


/// Finds a root of `func` using the
/// [Newton–Raphson method](https://en.wikipedia.org/wiki/Newton_method).
/// Supports analytic derivatives or a central finite-difference fallback.
///
/// # Arguments
/// - `func`  : function whose root is sought
/// - `dfunc` : optional derivative; if `None`, use finite-difference
/// - `x0`    : finite initial guess
/// - `cfg`   : [`NewtonCfg`] (`delta`, optional `max_iter`)
///
/// # Returns
/// [`RootFindingReport`] with:
/// - `root`                : `x_{k+1}` of the last iteration, or `x_k` on stall
/// - `evaluations`         : total evaluations (f and f')
/// - `termination_reason`  : [`TerminationReason::ToleranceReached`] or
///   [`TerminationReason::Stalled`] with [`StallReason::DerivativeZero`]
/// - `history`             : `(k, x_k, x_{k+1}, f'(x_k), f(x_k))` per iteration;
///   a stalled iteration has no `x_{k+1}` and carries the stall marker
///
/// # Errors
/// - [`NewtonError::InvalidGuess`]                         : `x0` non-finite
/// - [`NewtonError::StepNotFinite`]                        : `x - f/f'` not representable
/// - [`NewtonError::DerivativeNotFinite`]                  : FD derivative non-finite
/// - [`NewtonError::FiniteDifferenceStepUnrepresentable`]  : FD step unrepresentable near `x`
///
/// * Propagated via [`NewtonError::RootFinding`]:
/// - [`RootFindingError::Domain`]                          : `f` or `f'` undefined at an iterate
/// - [`RootFindingError::NonConvergence`]                  : `max_iter` iterations without
///   `|x_{k+1} - x_k| < delta` or `|f(x_k)| < delta`
///
/// # Behavior
/// - `f'(x_k) == 0` exactly is a stall, not an error: the record carries
///   the stall marker and `x_k` is returned without meeting any tolerance.
/// - FD path uses `h = eps^{1/3} * max(|x|, 1)`, rescued by ULP nudges
///   (`next_up/down`) if `x +/- h` collapses.
///
/// # Notes
/// - Convergence is *local only* and depends on a good initial guess `x0` and
///   smoothness of `f`. Poor guesses or ill-behaved functions can diverge or cycle.
///   For guaranteed convergence, use a **bracketed method** (e.g. bisection).
#[tracing::instrument(level = "debug", skip(func, dfunc, cfg), fields(delta = cfg.delta()))]
pub fn newton<F, G>(
    func: F,
    dfunc: Option<G>,
    x0: f64,
    cfg: NewtonCfg,
) -> Result<RootFindingReport, NewtonError>
where
    F: Evaluate,
    G: Evaluate,
{
    if !x0.is_finite() {
        return Err(NewtonError::InvalidGuess { x0 });
    }

    let delta    = cfg.common.delta();
    let num_iter = cfg.common.resolve_max_iter(ALGORITHM);

    let mut f  = CountedEval::new(func);
    let mut df = dfunc.map(CountedEval::new);
    let evals  = |f: &CountedEval<F>, df: &Option<CountedEval<G>>| {
        f.evals() + df.as_ref().map_or(0, CountedEval::evals)
    };

    let mut history = History::with_cap(num_iter);
    let mut x       = x0;
    for iter in 1..=num_iter {
        let fx  = f.eval(x)?;
        let dfx = match df.as_mut() {
            Some(d) => d.eval(x)?,
            None    => eval_dfx_fd(&mut f, x)?,
        };

        // stall: x_k is returned as is
        if dfx == 0.0 {
            history.push(IterationRecord::new(
                iter,
                Step::Newton { x, next: None, dfx },
                Residual::Stall(StallReason::DerivativeZero),
            ));
            tracing::warn!(iter, x, fx, "newton stalled on zero derivative");
            return Ok(RootFindingReport {
                root                : x,
                iterations          : iter,
                evaluations         : evals(&f, &df),
                termination_reason  : TerminationReason::Stalled(StallReason::DerivativeZero),
                tolerance_satisfied : ToleranceSatisfied::ToleranceNotReached,
                history,
                algorithm_name      : ALGORITHM.algorithm_name(),
            });
        }

        let step = -fx / dfx;
        let next = x + step;
        if !next.is_finite() {
            return Err(NewtonError::StepNotFinite { x, step });
        }

        history.push(IterationRecord::new(
            iter,
            Step::Newton { x, next: Some(next), dfx },
            Residual::Value(fx),
        ));
        tracing::trace!(iter, x, next, fx, dfx, "newton step");

        let satisfied = if (next - x).abs() < delta {
            Some(ToleranceSatisfied::StepSizeReached)
        } else if fx.abs() < delta {
            Some(ToleranceSatisfied::ResidualReached)
        } else {
            None
        };

        if let Some(tolerance_satisfied) = satisfied {
            tracing::debug!(iter, root = next, "newton converged");
            return Ok(RootFindingReport {
                root                : next,
                iterations          : iter,
                evaluations         : evals(&f, &df),
                termination_reason  : TerminationReason::ToleranceReached,
                tolerance_satisfied,
                history,
                algorithm_name      : ALGORITHM.algorithm_name(),
            });
        }

        x = next;
    }

    tracing::warn!(num_iter, last = x, "newton hit iteration limit");
    Err(RootFindingError::NonConvergence {
        algorithm : ALGORITHM,
        max_iter  : num_iter,
        last      : x,
        history,
    }.into())
}


/// [`newton`] with the derivative taken symbolically from `func`.
///
/// # Errors
/// - [`NewtonError::Expression`] if `func` has no derivative
///   (e.g. it contains `floor`)
/// - everything [`newton`] returns
///
/// ```
/// use zeros::expression::Evaluator;
/// use zeros::root_finding::newton::{newton_symbolic, NewtonCfg};
///
/// let f = Evaluator::compile("x^2 - 2").unwrap();
/// let report = newton_symbolic(f, 1.0, NewtonCfg::new()).unwrap();
/// assert!((report.root - 2f64.sqrt()).abs() < 1e-6);
/// ```
pub fn newton_symbolic<F>(
    func: F,
    x0: f64,
    cfg: NewtonCfg,
) -> Result<RootFindingReport, NewtonError>
where F: Differentiate {
    let dfunc = func.derivative()?;
    newton(func, Some(dfunc), x0, cfg)
}
