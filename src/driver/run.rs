//! Runs every method on one [`InputConfig`], isolating failures.

use thiserror::Error;

use super::input::InputConfig;
use crate::expression::{Evaluator, ExpressionError};
use crate::root_finding::algorithms::{Algorithm, BracketFamily, OpenFamily};
use crate::root_finding::bisection::{bisection, BisectionCfg, BisectionError};
use crate::root_finding::fixed_point::{fixed_point, FixedPointCfg, FixedPointError};
use crate::root_finding::history::History;
use crate::root_finding::newton::{newton_symbolic, NewtonCfg, NewtonError};
use crate::root_finding::regula_falsi::{regula_falsi, RegulaFalsiCfg, RegulaFalsiError};
use crate::root_finding::report::RootFindingReport;
use crate::root_finding::secant::{secant, SecantCfg, SecantError};

/// Why a single method produced no report.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid expression: {0}")]
    Expression(#[from] ExpressionError),

    #[error("fixed-point iteration needs g(x); add it as the sixth input field")]
    MissingFixedPointMap,

    #[error(transparent)]
    Bisection(#[from] BisectionError),

    #[error(transparent)]
    FixedPoint(#[from] FixedPointError),

    #[error(transparent)]
    Newton(#[from] NewtonError),

    #[error(transparent)]
    Secant(#[from] SecantError),

    #[error(transparent)]
    RegulaFalsi(#[from] RegulaFalsiError),
}

impl RunError {
    /// Iterations completed before the method gave up, if any were kept.
    pub fn partial_history(&self) -> Option<&History> {
        match self {
            RunError::Bisection(BisectionError::RootFinding(e))
            | RunError::FixedPoint(FixedPointError::RootFinding(e))
            | RunError::Newton(NewtonError::RootFinding(e))
            | RunError::Secant(SecantError::RootFinding(e))
            | RunError::RegulaFalsi(RegulaFalsiError::RootFinding(e)) => e.history(),
            _ => None,
        }
    }
}

/// Outcome of one method.
#[derive(Debug)]
pub struct MethodRun {
    pub algorithm : Algorithm,
    pub result    : Result<RootFindingReport, RunError>,
}

/// Runs `algorithm` on `input`.
///
/// Expressions are compiled afresh for every call, so runs share nothing.
pub fn run_method(algorithm: Algorithm, input: &InputConfig) -> MethodRun {
    let result = solve(algorithm, input);
    match &result {
        Ok(report) => tracing::debug!(
            %algorithm,
            root       = report.root,
            iterations = report.iterations,
            "method finished"
        ),
        Err(e) => tracing::warn!(%algorithm, error = %e, "method failed"),
    }
    MethodRun { algorithm, result }
}

/// Runs all five methods in report order. A failure never stops the rest.
pub fn run_all(input: &InputConfig) -> Vec<MethodRun> {
    Algorithm::ALL
        .iter()
        .map(|&algorithm| run_method(algorithm, input))
        .collect()
}

fn solve(algorithm: Algorithm, input: &InputConfig) -> Result<RootFindingReport, RunError> {
    let f = Evaluator::compile(&input.function)?;
    let report = match algorithm {
        Algorithm::Bracket(BracketFamily::Bisection)   => run_bisection(f, input)?,
        Algorithm::Bracket(BracketFamily::RegulaFalsi) => run_regula_falsi(f, input)?,
        Algorithm::Open(OpenFamily::Newton)            => run_newton(f, input)?,
        Algorithm::Open(OpenFamily::Secant)            => run_secant(f, input)?,
        Algorithm::Open(OpenFamily::FixedPoint)        => {
            let g = input
                .fixed_point_map
                .as_deref()
                .ok_or(RunError::MissingFixedPointMap)?;
            let g = Evaluator::compile(g)?;
            run_fixed_point(f, g, input)?
        }
    };
    Ok(report)
}

fn run_bisection(f: Evaluator, input: &InputConfig) -> Result<RootFindingReport, BisectionError> {
    let cfg = BisectionCfg::new()
        .set_delta(input.delta)?
        .set_max_iter(input.n)?;
    bisection(f, input.a, input.b, cfg)
}

fn run_fixed_point(
    f: Evaluator,
    g: Evaluator,
    input: &InputConfig,
) -> Result<RootFindingReport, FixedPointError> {
    let cfg = FixedPointCfg::new()
        .set_delta(input.delta)?
        .set_max_iter(input.n)?;
    fixed_point(f, g, input.a, cfg)
}

fn run_newton(f: Evaluator, input: &InputConfig) -> Result<RootFindingReport, NewtonError> {
    let cfg = NewtonCfg::new()
        .set_delta(input.delta)?
        .set_max_iter(input.n)?;
    newton_symbolic(f, input.a, cfg)
}

fn run_secant(f: Evaluator, input: &InputConfig) -> Result<RootFindingReport, SecantError> {
    let cfg = SecantCfg::new()
        .set_delta(input.delta)?
        .set_max_iter(input.n)?;
    secant(f, input.a, input.b, cfg)
}

fn run_regula_falsi(f: Evaluator, input: &InputConfig) -> Result<RootFindingReport, RegulaFalsiError> {
    let cfg = RegulaFalsiCfg::new()
        .set_delta(input.delta)?
        .set_max_iter(input.n)?;
    regula_falsi(f, input.a, input.b, cfg)
}
