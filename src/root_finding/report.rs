//! Defines the [`RootFindingReport`] struct returned by all
//! root-finding algorithms.

use super::history::{History, StallReason};

/// Reasons a root-finding algorithm may terminate successfully.
///
/// Running out of iterations is not a termination reason; it is the
/// [`super::errors::RootFindingError::NonConvergence`] error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    ToleranceReached,
    /// The update rule became undefined; `root` is the last iterate
    /// computed before the stall and has not met any tolerance.
    Stalled(StallReason),
}


/// Which tolerance condition was satisfied (or not).
/// - [`ToleranceSatisfied::ResidualReached`]
///     - All methods
///     - |f(x)| < delta
/// - [`ToleranceSatisfied::WidthTolReached`]
///     - [`super::algorithms::Algorithm::Bracket`]
///     - [a, b] -> (b - a).abs() < delta
/// - [`ToleranceSatisfied::StepSizeReached`]
///     - [`super::algorithms::Algorithm::Open`]
///     - |x_n - x_{n - 1}| < delta
/// - [`ToleranceSatisfied::ToleranceNotReached`]
///     - Stalled runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToleranceSatisfied {
    ResidualReached,
    WidthTolReached,
    StepSizeReached,
    ToleranceNotReached,
}


/// Final report returned by all root-finding algorithms.
///
/// [`RootFindingReport`]
/// - `root`                : best root estimate
/// - `iterations`          : total iterations
/// - `evaluations`         : total function (and derivative) evaluations
/// - `termination_reason`  : why the solver stopped ([`TerminationReason`])
/// - `tolerance_satisfied` : which tolerance was met ([`ToleranceSatisfied`])
/// - `history`             : one record per iteration, in order
/// - `algorithm_name`      : algorithm name (e.g. `"bisection"`)
#[derive(Debug, Clone, PartialEq)]
pub struct RootFindingReport {
    pub root                : f64,
    pub iterations          : usize,
    pub evaluations         : usize,
    pub termination_reason  : TerminationReason,
    pub tolerance_satisfied : ToleranceSatisfied,
    pub history             : History,
    pub algorithm_name      : &'static str,
}
impl RootFindingReport {
    pub fn is_stalled(&self) -> bool {
        matches!(self.termination_reason, TerminationReason::Stalled(_))
    }
}
