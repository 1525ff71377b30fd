//! tests for the regula falsi root finding algorithm
use zeros::expression::{DomainError, Evaluator};
use zeros::root_finding::bisection::{bisection, BisectionCfg};
use zeros::root_finding::errors::RootFindingError;
use zeros::root_finding::history::{Residual, StallReason, Step};
use zeros::root_finding::regula_falsi::{regula_falsi, RegulaFalsiCfg, RegulaFalsiError};
use zeros::root_finding::report::{TerminationReason, ToleranceSatisfied};

type TestResult = Result<(), RegulaFalsiError>;

#[test]
fn agrees_with_bisection_on_cubic() -> TestResult {
    let cfg = RegulaFalsiCfg::new().set_delta(1e-6)?.set_max_iter(200)?;
    let rf  = regula_falsi(Evaluator::compile("x^3 - x - 2").unwrap(), 1.0, 2.0, cfg)?;

    let bis = bisection(
        Evaluator::compile("x^3 - x - 2").unwrap(),
        1.0,
        2.0,
        BisectionCfg::new().set_delta(1e-6).unwrap(),
    )
    .unwrap();

    assert_eq!(rf.termination_reason, TerminationReason::ToleranceReached);
    assert!((rf.root - 1.521_379_706_8).abs() < 1e-6);
    assert!((rf.root - bis.root).abs() < 1e-5);
    assert_eq!(rf.algorithm_name, "regula_falsi");
    Ok(())
}

#[test]
fn bracket_stays_inside_initial_interval() -> TestResult {
    let f   = |x: f64| x * x * x - x - 2.0;
    let res = regula_falsi(f, 1.0, 2.0, RegulaFalsiCfg::new())?;

    for record in &res.history {
        let Step::FalsePosition { a, b, x: Some(c) } = record.step else {
            panic!("unexpected step {:?}", record.step);
        };
        assert!((1.0..=2.0).contains(&a));
        assert!((1.0..=2.0).contains(&b));
        assert!(c > a.min(b) && c < a.max(b));
    }
    Ok(())
}

#[test]
fn linear_function_in_one_step() -> TestResult {
    let f   = |x: f64| 2.0 * x - 6.0;
    let res = regula_falsi(f, 0.0, 10.0, RegulaFalsiCfg::new())?;

    assert_eq!(res.iterations, 1);
    assert_eq!(res.root, 3.0);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::ResidualReached);
    assert_eq!(res.history.records()[0].value, Residual::Value(0.0));
    Ok(())
}

#[test]
fn stops_on_narrow_bracket() -> TestResult {
    // a jump never gives a small residual
    let f   = |x: f64| if x < 0.5 { -1.0 } else { 1.0 };
    let res = regula_falsi(f, 0.499_999_9, 0.500_000_1, RegulaFalsiCfg::new())?;

    assert_eq!(res.iterations, 1);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::WidthTolReached);
    assert!((res.root - 0.5).abs() < 1e-6);
    assert!(matches!(res.history.records()[0].value, Residual::Value(v) if v.abs() == 1.0));
    Ok(())
}

#[test]
fn equal_endpoint_values_stall_on_a() -> TestResult {
    let f   = |x: f64| x * x;
    let res = regula_falsi(f, -1.0, 1.0, RegulaFalsiCfg::new())?;

    assert_eq!(res.termination_reason, TerminationReason::Stalled(StallReason::ZeroDenominator));
    assert_eq!(res.root, -1.0);
    assert_eq!(res.iterations, 1);
    assert_eq!(res.history.last().unwrap().step, Step::FalsePosition { a: -1.0, b: 1.0, x: None });
    Ok(())
}

#[test]
fn uses_max_iter() -> TestResult {
    let f   = |x: f64| x * x * x - x - 2.0;
    let cfg = RegulaFalsiCfg::new().set_max_iter(3)?;
    let err = regula_falsi(f, 1.0, 2.0, cfg).unwrap_err();

    match err {
        RegulaFalsiError::RootFinding(RootFindingError::NonConvergence { max_iter, history, last, .. }) => {
            assert_eq!(max_iter, 3);
            assert_eq!(history.len(), 3);
            assert_eq!(Some(last), history.last().unwrap().step.iterate());
        }
        other => panic!("expected NonConvergence, got {other:?}"),
    }
    Ok(())
}

#[test]
fn rejects_non_finite_bounds() -> TestResult {
    let f   = |x: f64| x;
    let err = regula_falsi(f, 0.0, f64::NEG_INFINITY, RegulaFalsiCfg::new()).unwrap_err();

    assert!(matches!(err, RegulaFalsiError::InvalidBounds { a, .. } if a == 0.0));
    Ok(())
}

#[test]
fn domain_error_propagates() -> TestResult {
    let f   = Evaluator::compile("ln(x)").unwrap();
    let err = regula_falsi(f, -1.0, 2.0, RegulaFalsiCfg::new()).unwrap_err();

    assert!(matches!(
        err,
        RegulaFalsiError::RootFinding(RootFindingError::Domain(DomainError::OutOfDomain { function: "ln", .. }))
    ));
    Ok(())
}

#[test]
fn repeated_runs_are_identical() -> TestResult {
    let run = || regula_falsi(Evaluator::compile("x^3 - x - 2").unwrap(), 1.0, 2.0, RegulaFalsiCfg::new());

    let first  = run()?;
    let second = run()?;
    assert_eq!(first.root, second.root);
    assert_eq!(first.iterations, second.iterations);
    assert_eq!(first.history, second.history);
    Ok(())
}
