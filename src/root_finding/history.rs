//! Per-iteration records collected by every root-finding algorithm.
//!
//! [`History`]          : ordered, append-only list of records
//! └ [`IterationRecord`]
//!    ├ `index` : 1-based iteration number
//!    ├ `step`  : method-specific values ([`Step`])
//!    └ `value` : function value, or the stall marker that ended the run ([`Residual`])

use std::fmt;


/// Why an update rule became undefined before the tolerance was met.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallReason {
    /// Newton: `f'(x) == 0`.
    DerivativeZero,
    /// Secant / regula falsi: the two function values are equal.
    ZeroDenominator,
}
impl fmt::Display for StallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StallReason::DerivativeZero  => write!(f, "derivative zero"),
            StallReason::ZeroDenominator => write!(f, "division by zero"),
        }
    }
}


/// Function value recorded for an iteration, or a stall marker in its place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Residual {
    Value(f64),
    Stall(StallReason),
}
impl fmt::Display for Residual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Residual::Value(v)     => write!(f, "{v}"),
            Residual::Stall(stall) => write!(f, "{stall}"),
        }
    }
}


/// Method-specific values of one iteration.
///
/// - [`Step::Bisection`]     : bracket `[a, b]` before the update and its midpoint; value `f(midpoint)`
/// - [`Step::FixedPoint`]    : current `x` and `g(x)`; value `f(x)`
/// - [`Step::Newton`]        : current `x`, next iterate (`None` on stall) and `f'(x)`; value `f(x)`
/// - [`Step::Secant`]        : window `x0, x1` and new point `x2` (`None` on stall); value `f(x2)`
/// - [`Step::FalsePosition`] : bracket `[a, b]` before the update and the interpolated point
///   (`None` on stall); value `f(x)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Bisection     { a: f64, b: f64, midpoint: f64 },
    FixedPoint    { x: f64, gx: f64 },
    Newton        { x: f64, next: Option<f64>, dfx: f64 },
    Secant        { x0: f64, x1: f64, x2: Option<f64> },
    FalsePosition { a: f64, b: f64, x: Option<f64> },
}
impl Step {
    /// The new point this step produced, if any.
    pub fn iterate(&self) -> Option<f64> {
        match *self {
            Step::Bisection { midpoint, .. } => Some(midpoint),
            Step::FixedPoint { gx, .. }      => Some(gx),
            Step::Newton { next, .. }        => next,
            Step::Secant { x2, .. }          => x2,
            Step::FalsePosition { x, .. }    => x,
        }
    }
}
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn opt(v: Option<f64>) -> String {
            v.map_or_else(|| "-".to_string(), |v| v.to_string())
        }

        match *self {
            Step::Bisection { a, b, midpoint } => write!(f, "{a}\t{b}\t{midpoint}"),
            Step::FixedPoint { x, gx }         => write!(f, "{x}\t{gx}"),
            Step::Newton { x, next, dfx }      => write!(f, "{x}\t{}\t{dfx}", opt(next)),
            Step::Secant { x0, x1, x2 }        => write!(f, "{x0}\t{x1}\t{}", opt(x2)),
            Step::FalsePosition { a, b, x }    => write!(f, "{a}\t{b}\t{}", opt(x)),
        }
    }
}


/// One immutable iteration record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationRecord {
    pub index : usize,
    pub step  : Step,
    pub value : Residual,
}
impl IterationRecord {
    pub(crate) fn new(index: usize, step: Step, value: Residual) -> Self {
        Self { index, step, value }
    }

    pub fn is_stall(&self) -> bool {
        matches!(self.value, Residual::Stall(_))
    }
}
impl fmt::Display for IterationRecord {
    /// Tab-separated: index, step values, function value or marker.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.index, self.step, self.value)
    }
}


/// Chronological iteration history of a single solver run.
///
/// Records can only be appended by the solvers; callers get read-only
/// access. The length never exceeds the iteration cap the run was given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    records : Vec<IterationRecord>,
    cap     : usize,
}
impl History {
    pub(crate) fn with_cap(cap: usize) -> Self {
        Self { records: Vec::with_capacity(cap.min(64)), cap }
    }

    pub(crate) fn push(&mut self, record: IterationRecord) {
        debug_assert!(self.records.len() < self.cap, "history exceeds iteration cap {}", self.cap);
        self.records.push(record);
    }

    pub fn records(&self) -> &[IterationRecord] { &self.records }
    pub fn len(&self)      -> usize             { self.records.len() }
    pub fn is_empty(&self) -> bool              { self.records.is_empty() }
    pub fn last(&self)     -> Option<&IterationRecord> { self.records.last() }
    pub fn cap(&self)      -> usize             { self.cap }

    pub fn iter(&self) -> std::slice::Iter<'_, IterationRecord> {
        self.records.iter()
    }
}
impl<'a> IntoIterator for &'a History {
    type Item = &'a IterationRecord;
    type IntoIter = std::slice::Iter<'a, IterationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
