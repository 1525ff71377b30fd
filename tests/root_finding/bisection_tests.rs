//! tests for the bisection root finding algorithm
use approx::assert_relative_eq;
use zeros::expression::{DomainError, Evaluator};
use zeros::root_finding::bisection::{bisection, BisectionCfg, BisectionError};
use zeros::root_finding::errors::{RootFindingError, ToleranceError};
use zeros::root_finding::history::Step;
use zeros::root_finding::report::{TerminationReason, ToleranceSatisfied};

type TestResult = Result<(), BisectionError>;

#[test]
fn finds_cubic_root() -> TestResult {
    let f   = Evaluator::compile("x^3 - x - 2").unwrap();
    let cfg = BisectionCfg::new()
        .set_delta(1e-6)?
        .set_max_iter(100)?;

    let res = bisection(f, 1.0, 2.0, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::WidthTolReached);
    assert!((res.root - 1.521_379_706_8).abs() < 1e-6);
    // 1 / 2^20 < 1e-6 <= 1 / 2^19
    assert_eq!(res.iterations, 20);
    assert_eq!(res.history.len(), 20);
    assert_eq!(res.algorithm_name, "bisection");
    Ok(())
}

#[test]
fn bracket_halves_every_iteration() -> TestResult {
    let f   = |x: f64| x * x - 2.0;
    let cfg = BisectionCfg::new().set_delta(1e-9)?;

    let res = bisection(f, 0.0, 2.0, cfg)?;

    for record in &res.history {
        let Step::Bisection { a, b, midpoint } = record.step else {
            panic!("unexpected step {:?}", record.step);
        };
        let expected = 2.0 / 2f64.powi(record.index as i32 - 1);
        assert_relative_eq!((b - a).abs(), expected, max_relative = 1e-12);
        assert_relative_eq!(midpoint, (a + b) / 2.0);
    }
    assert_eq!(res.root, res.history.last().unwrap().step.iterate().unwrap());
    Ok(())
}

#[test]
fn width_already_below_delta() -> TestResult {
    let f   = |x: f64| x - 1.0;
    let res = bisection(f, 1.0, 1.0 + 1e-9, BisectionCfg::new())?;

    assert_eq!(res.root, 1.0);
    assert_eq!(res.iterations, 0);
    assert!(res.history.is_empty());
    assert_eq!(res.tolerance_satisfied, ToleranceSatisfied::WidthTolReached);
    Ok(())
}

#[test]
fn reversed_bracket_still_converges() -> TestResult {
    let f   = |x: f64| 2.0 * x - 6.0;
    let res = bisection(f, 10.0, 0.0, BisectionCfg::new())?;

    assert!((res.root - 3.0).abs() < 1e-6);
    Ok(())
}

#[test]
fn uses_max_iter() -> TestResult {
    let f   = |x: f64| x * x * x - x - 2.0;
    let cfg = BisectionCfg::new().set_max_iter(5)?;
    let err = bisection(f, 1.0, 2.0, cfg).unwrap_err();

    match err {
        BisectionError::RootFinding(RootFindingError::NonConvergence { max_iter, history, .. }) => {
            assert_eq!(max_iter, 5);
            assert_eq!(history.len(), 5);
            assert_eq!(history.records()[0].index, 1);
            assert_eq!(history.records()[4].index, 5);
        }
        other => panic!("expected NonConvergence, got {other:?}"),
    }
    Ok(())
}

#[test]
fn huge_bracket_uses_iteration_fallback() -> TestResult {
    let err = bisection(|x: f64| x, -1e308, 1e308, BisectionCfg::new()).unwrap_err();

    match err {
        BisectionError::RootFinding(RootFindingError::NonConvergence { max_iter, history, last, .. }) => {
            assert_eq!(max_iter, 500);
            assert_eq!(history.len(), 500);
            assert!(last.is_finite());
            for record in &history {
                let Step::Bisection { midpoint, .. } = record.step else {
                    panic!("unexpected step {:?}", record.step);
                };
                assert!(midpoint.is_finite());
            }
        }
        other => panic!("expected NonConvergence, got {other:?}"),
    }
    Ok(())
}

#[test]
fn subnormal_delta_uses_iteration_fallback() -> TestResult {
    let f   = |x: f64| x - 1.0;
    let cfg = BisectionCfg::new().set_delta(1e-320)?;
    let err = bisection(f, 0.0, 1e10, cfg).unwrap_err();

    assert!(matches!(
        err,
        BisectionError::RootFinding(RootFindingError::NonConvergence { max_iter: 500, .. })
    ));
    Ok(())
}

#[test]
fn domain_error_propagates() -> TestResult {
    let f   = Evaluator::compile("sqrt(x) - 2").unwrap();
    let err = bisection(f, -1.0, 5.0, BisectionCfg::new()).unwrap_err();

    assert!(matches!(
        err,
        BisectionError::RootFinding(RootFindingError::Domain(DomainError::OutOfDomain { x, .. }))
        if x == -1.0
    ));
    Ok(())
}

#[test]
fn rejects_non_finite_bounds() -> TestResult {
    let f   = |x: f64| x;
    let err = bisection(f, f64::NAN, 1.0, BisectionCfg::new()).unwrap_err();

    assert!(matches!(err, BisectionError::InvalidBounds { b, .. } if b == 1.0));
    Ok(())
}

#[test]
fn rejects_invalid_config() {
    assert!(matches!(
        BisectionCfg::new().set_delta(0.0),
        Err(ToleranceError::InvalidDelta { .. })
    ));
    assert!(matches!(
        BisectionCfg::new().set_delta(f64::NAN),
        Err(ToleranceError::InvalidDelta { .. })
    ));
    assert!(matches!(
        BisectionCfg::new().set_max_iter(0),
        Err(RootFindingError::InvalidMaxIter { got: 0 })
    ));
}

#[test]
fn repeated_runs_are_identical() -> TestResult {
    let run = || -> Result<_, BisectionError> {
        let f = Evaluator::compile("cos(x) - x").unwrap();
        bisection(f, 0.0, 1.0, BisectionCfg::new().set_delta(1e-8)?)
    };

    let first  = run()?;
    let second = run()?;
    assert_eq!(first.root, second.root);
    assert_eq!(first.history, second.history);
    Ok(())
}
