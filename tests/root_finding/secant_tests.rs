//! tests for the secant root finding algorithm
use zeros::expression::{DomainError, Evaluator};
use zeros::root_finding::errors::RootFindingError;
use zeros::root_finding::history::{Residual, StallReason, Step};
use zeros::root_finding::report::{TerminationReason, ToleranceSatisfied};
use zeros::root_finding::secant::{secant, SecantCfg, SecantError};

type TestResult = Result<(), SecantError>;

fn step_sizes(history: &zeros::root_finding::history::History) -> Vec<f64> {
    history
        .iter()
        .filter_map(|record| match record.step {
            Step::Secant { x1, x2: Some(x2), .. } => Some((x2 - x1).abs()),
            _ => None,
        })
        .collect()
}

#[test]
fn finds_sqrt_2() -> TestResult {
    let f   = Evaluator::compile("x^2 - 2").unwrap();
    let cfg = SecantCfg::new().set_delta(1e-6)?.set_max_iter(50)?;

    let res = secant(f, 1.0, 2.0, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert!((res.root - 2f64.sqrt()).abs() < 1e-6);
    assert_eq!(res.algorithm_name, "secant");

    let steps = step_sizes(&res.history);
    assert!(steps.last().unwrap() < steps.first().unwrap());
    Ok(())
}

#[test]
fn first_record_uses_initial_window() -> TestResult {
    let f   = |x: f64| x * x - 2.0;
    let res = secant(f, 1.0, 2.0, SecantCfg::new())?;

    // f(1) = -1, f(2) = 2  =>  x2 = 2 - 2 * 1 / 3
    let first = res.history.records()[0];
    let x2    = 2.0 - 2.0 / 3.0;
    assert_eq!(first.step, Step::Secant { x0: 1.0, x1: 2.0, x2: Some(x2) });
    assert_eq!(first.value, Residual::Value(x2 * x2 - 2.0));

    // window slides: (x0, x1) <- (x1, x2)
    let second = res.history.records()[1];
    assert!(matches!(second.step, Step::Secant { x0, x1, .. } if x0 == 2.0 && x1 == x2));
    Ok(())
}

#[test]
fn caches_function_values() -> TestResult {
    let f   = |x: f64| x * x * x - x - 2.0;
    let res = secant(f, 1.0, 2.0, SecantCfg::new())?;

    // two initial values, then one per iteration
    assert_eq!(res.evaluations, res.iterations + 2);
    Ok(())
}

#[test]
fn stops_on_small_residual() -> TestResult {
    // f(2) = 1e-8, f(3) = 2e-8  =>  x2 = 1 with a step of 2
    let f   = |x: f64| 1e-8 * (x - 1.0);
    let res = secant(f, 2.0, 3.0, SecantCfg::new())?;

    assert_eq!(res.iterations, 1);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::ResidualReached);
    assert_eq!(res.root, 1.0);
    Ok(())
}

#[test]
fn domain_error_propagates() -> TestResult {
    // f(4) = 1, f(9) = 2  =>  x2 = -1
    let f   = Evaluator::compile("sqrt(x) - 1").unwrap();
    let err = secant(f, 4.0, 9.0, SecantCfg::new()).unwrap_err();

    assert!(matches!(
        err,
        SecantError::RootFinding(RootFindingError::Domain(DomainError::OutOfDomain { function: "sqrt", .. }))
    ));
    Ok(())
}

#[test]
fn equal_values_stall() -> TestResult {
    let f   = |x: f64| x * x + 1.0;
    let res = secant(f, -1.0, 1.0, SecantCfg::new())?;

    assert_eq!(res.termination_reason, TerminationReason::Stalled(StallReason::ZeroDenominator));
    assert_eq!(res.root, 1.0);
    assert_eq!(res.iterations, 1);

    let last = res.history.last().unwrap();
    assert_eq!(last.step, Step::Secant { x0: -1.0, x1: 1.0, x2: None });
    assert_eq!(last.value, Residual::Stall(StallReason::ZeroDenominator));
    Ok(())
}

#[test]
fn uses_max_iter() -> TestResult {
    let f   = |x: f64| x * x - 2.0;
    let cfg = SecantCfg::new().set_max_iter(2)?;
    let err = secant(f, 1.0, 2.0, cfg).unwrap_err();

    match err {
        SecantError::RootFinding(RootFindingError::NonConvergence { max_iter, history, .. }) => {
            assert_eq!(max_iter, 2);
            assert_eq!(history.len(), 2);
        }
        other => panic!("expected NonConvergence, got {other:?}"),
    }
    Ok(())
}

#[test]
fn rejects_non_finite_guesses() -> TestResult {
    let f   = |x: f64| x;
    let err = secant(f, 0.0, f64::INFINITY, SecantCfg::new()).unwrap_err();

    assert!(matches!(err, SecantError::InvalidGuess { x0, .. } if x0 == 0.0));
    Ok(())
}

#[test]
fn repeated_runs_are_identical() -> TestResult {
    let run = || secant(Evaluator::compile("x^2 - 2").unwrap(), 1.0, 2.0, SecantCfg::new());

    let first  = run()?;
    let second = run()?;
    assert_eq!(first.root, second.root);
    assert_eq!(first.history, second.history);
    Ok(())
}
