//! tests for the newton root finding algorithm
use zeros::expression::{DomainError, Evaluator, ExpressionError};
use zeros::root_finding::errors::RootFindingError;
use zeros::root_finding::history::{Residual, StallReason, Step};
use zeros::root_finding::newton::{newton, newton_symbolic, NewtonCfg, NewtonError};
use zeros::root_finding::report::{TerminationReason, ToleranceSatisfied};

type TestResult = Result<(), NewtonError>;

#[test]
fn symbolic_sqrt_2_under_ten_iterations() -> TestResult {
    let f   = Evaluator::compile("x^2 - 2").unwrap();
    let cfg = NewtonCfg::new().set_delta(1e-6)?.set_max_iter(50)?;

    let res = newton_symbolic(f, 1.0, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert!((res.root - 1.414_213_56).abs() < 1e-8);
    assert!(res.iterations < 10);
    assert_eq!(res.algorithm_name, "newton");
    Ok(())
}

#[test]
fn analytic_derivative() -> TestResult {
    let f  = |x: f64| x * x - 2.0;
    let df = |x: f64| 2.0 * x;

    let res = newton(f, Some(df), 1.0, NewtonCfg::new())?;

    let first = res.history.records()[0];
    assert_eq!(first.step, Step::Newton { x: 1.0, next: Some(1.5), dfx: 2.0 });
    assert_eq!(first.value, Residual::Value(-1.0));
    assert!((res.root - 2f64.sqrt()).abs() < 1e-8);
    // one f and one f' per iteration
    assert_eq!(res.evaluations, 2 * res.iterations);
    Ok(())
}

#[test]
fn finite_difference_fallback() -> TestResult {
    let f   = |x: f64| x.exp() - 2.0;
    let res = newton(f, None::<fn(f64) -> f64>, 0.0, NewtonCfg::new().set_delta(1e-10)?)?;

    assert!((res.root - 2f64.ln()).abs() < 1e-9);
    // one f and two FD samples per iteration
    assert_eq!(res.evaluations, 3 * res.iterations);
    Ok(())
}

#[test]
fn stops_on_small_step() -> TestResult {
    let f  = |x: f64| x - 3.0;
    let df = |_: f64| 1.0;

    let res = newton(f, Some(df), 0.0, NewtonCfg::new())?;

    // first step lands exactly on the root, second step is zero
    assert_eq!(res.iterations, 2);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::StepSizeReached);
    assert_eq!(res.root, 3.0);
    Ok(())
}

#[test]
fn stops_on_small_residual() -> TestResult {
    // shallow line: residual is tiny while the step is still 1
    let f  = |x: f64| 1e-8 * (x - 1.0);
    let df = |_: f64| 1e-8;

    let res = newton(f, Some(df), 2.0, NewtonCfg::new())?;

    assert_eq!(res.iterations, 1);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::ResidualReached);
    assert_eq!(res.root, 1.0);
    assert_eq!(res.history.records()[0].value, Residual::Value(1e-8));
    Ok(())
}

#[test]
fn constant_function_stalls_immediately() -> TestResult {
    let f   = Evaluator::compile("1").unwrap();
    let res = newton_symbolic(f, 1.0, NewtonCfg::new())?;

    assert!(res.is_stalled());
    assert_eq!(res.termination_reason, TerminationReason::Stalled(StallReason::DerivativeZero));
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::ToleranceNotReached);
    assert_eq!(res.iterations, 1);
    assert_eq!(res.root, 1.0);

    let last = res.history.last().unwrap();
    assert!(last.is_stall());
    assert_eq!(last.value, Residual::Stall(StallReason::DerivativeZero));
    assert_eq!(last.step.iterate(), None);
    Ok(())
}

#[test]
fn stall_returns_last_iterate() -> TestResult {
    // derivative vanishes everywhere except x0, so the second iteration stalls
    let f  = |x: f64| x * x - 4.0;
    let df = |x: f64| if x == 1.0 { 2.0 } else { 0.0 };

    let res = newton(f, Some(df), 1.0, NewtonCfg::new())?;

    assert!(res.is_stalled());
    assert_eq!(res.history.len(), 2);
    assert_eq!(res.history.records()[0].step.iterate(), Some(2.5));
    assert!(res.history.records()[1].is_stall());
    assert_eq!(res.root, 2.5);
    Ok(())
}

#[test]
fn divergence_hits_max_iter() -> TestResult {
    // newton on cbrt(x) doubles |x| every step
    let f   = |x: f64| x.cbrt();
    let df  = |x: f64| 1.0 / (3.0 * x.cbrt() * x.cbrt());
    let cfg = NewtonCfg::new().set_max_iter(10)?;

    let err = newton(f, Some(df), 1.0, cfg).unwrap_err();

    match err {
        NewtonError::RootFinding(RootFindingError::NonConvergence { max_iter, history, last, .. }) => {
            assert_eq!(max_iter, 10);
            assert_eq!(history.len(), 10);
            assert!(last.abs() > 100.0);
        }
        other => panic!("expected NonConvergence, got {other:?}"),
    }
    Ok(())
}

#[test]
fn domain_error_propagates() -> TestResult {
    // ln(x) - 1 from x0 = 10 jumps to a negative x
    let f   = Evaluator::compile("ln(x) - 1").unwrap();
    let err = newton_symbolic(f, 10.0, NewtonCfg::new()).unwrap_err();

    assert!(matches!(
        err,
        NewtonError::RootFinding(RootFindingError::Domain(DomainError::OutOfDomain { .. }))
    ));
    Ok(())
}

#[test]
fn non_differentiable_expression() -> TestResult {
    let f   = Evaluator::compile("floor(x) - 1").unwrap();
    let err = newton_symbolic(f, 0.5, NewtonCfg::new()).unwrap_err();

    assert!(matches!(
        err,
        NewtonError::Expression(ExpressionError::NotDifferentiable { function: "floor" })
    ));
    Ok(())
}

#[test]
fn rejects_non_finite_guess() -> TestResult {
    let f   = |x: f64| x;
    let err = newton(f, Some(f), f64::NAN, NewtonCfg::new()).unwrap_err();

    assert!(matches!(err, NewtonError::InvalidGuess { .. }));
    Ok(())
}

#[test]
fn repeated_runs_are_identical() -> TestResult {
    let run = || newton_symbolic(Evaluator::compile("x^3 - 2*x - 5").unwrap(), 2.0, NewtonCfg::new());

    let first  = run()?;
    let second = run()?;
    assert_eq!(first.root, second.root);
    assert_eq!(first.history, second.history);
    Ok(())
}
