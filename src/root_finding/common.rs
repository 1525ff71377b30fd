//! Helpers shared by all root-finding algorithms.
//! - [`CountedEval`]                : evaluation wrapper counting calls
//! - [`bisection_theoretical_iter`] : halvings needed to reach a width


use crate::expression::Evaluate;
use super::algorithms::GLOBAL_MAX_ITER_FALLBACK;
use super::errors::RootFindingError;


/// Wraps an [`Evaluate`], counting evaluations and lifting
/// domain failures into [`RootFindingError::Domain`].
pub(crate) struct CountedEval<F> {
    func  : F,
    evals : usize,
}
impl<F: Evaluate> CountedEval<F> {
    pub(crate) fn new(func: F) -> Self {
        Self { func, evals: 0 }
    }

    #[inline]
    pub(crate) fn eval(&mut self, x: f64) -> Result<f64, RootFindingError> {
        self.evals += 1;
        Ok(self.func.eval(x)?)
    }

    pub(crate) fn evals(&self) -> usize { self.evals }
}


/// Number of halvings after which a bracket of width `|b - a|` is
/// strictly narrower than `delta`.
///
/// Returns `0` when the bracket is already narrower, and
/// [`GLOBAL_MAX_ITER_FALLBACK`] when the count exceeds it or the ratio
/// `w0 / delta` is not representable.
pub(crate) fn bisection_theoretical_iter(a: f64, b: f64, delta: f64) -> usize {
    let w0 = (b - a).abs();
    if w0 < delta {
        return 0;
    }
    // width after k halvings is w0 / 2^k; need w0 / 2^k < delta
    let k = (w0 / delta).log2().floor();
    if !k.is_finite() || k >= GLOBAL_MAX_ITER_FALLBACK as f64 {
        return GLOBAL_MAX_ITER_FALLBACK;
    }
    (k as usize + 1).min(GLOBAL_MAX_ITER_FALLBACK)
}
