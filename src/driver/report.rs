//! Plain-text report of a full run.

use std::fmt::Write as _;
use std::path::Path;

use super::run::MethodRun;
use crate::root_finding::algorithms::{Algorithm, BracketFamily, OpenFamily};
use crate::root_finding::history::History;
use crate::root_finding::report::{RootFindingReport, TerminationReason, ToleranceSatisfied};

/// Column header matching [`crate::root_finding::history::IterationRecord`]'s
/// `Display` for each method.
fn columns(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::Bracket(BracketFamily::Bisection)   => "k\ta\tb\tmidpoint\tf(midpoint)",
        Algorithm::Bracket(BracketFamily::RegulaFalsi) => "k\ta\tb\tc\tf(c)",
        Algorithm::Open(OpenFamily::FixedPoint)        => "k\tx\tg(x)\tf(x)",
        Algorithm::Open(OpenFamily::Newton)            => "k\tx\tx_next\tf'(x)\tf(x)",
        Algorithm::Open(OpenFamily::Secant)            => "k\tx0\tx1\tx2\tf(x2)",
    }
}

fn termination(report: &RootFindingReport) -> String {
    match report.termination_reason {
        TerminationReason::ToleranceReached => {
            let which = match report.tolerance_satisfied {
                ToleranceSatisfied::ResidualReached     => "|f(x)| < delta",
                ToleranceSatisfied::WidthTolReached     => "|b - a| < delta",
                ToleranceSatisfied::StepSizeReached     => "step < delta",
                ToleranceSatisfied::ToleranceNotReached => "no tolerance met",
            };
            format!("converged ({which})")
        }
        TerminationReason::Stalled(reason) => {
            format!("stalled ({reason}); root is the last iterate and may be unreliable")
        }
    }
}

fn write_history(out: &mut String, history: &History) {
    for record in history {
        let _ = writeln!(out, "{record}");
    }
}

/// Renders all runs, one section per method, in the order given.
pub fn render(runs: &[MethodRun]) -> String {
    let mut out = String::new();
    for run in runs {
        let _ = writeln!(out, "===== {} =====", run.algorithm.title());
        let _ = writeln!(out, "{}", columns(run.algorithm));

        match &run.result {
            Ok(report) => {
                write_history(&mut out, &report.history);
                let _ = writeln!(out);
                let _ = writeln!(out, "Approximate root: {}", report.root);
                let _ = writeln!(
                    out,
                    "Termination: {} after {} iterations, {} evaluations",
                    termination(report),
                    report.iterations,
                    report.evaluations,
                );
            }
            Err(e) => {
                if let Some(history) = e.partial_history() {
                    write_history(&mut out, history);
                }
                let _ = writeln!(out);
                let _ = writeln!(out, "Failed: {e}");
            }
        }
        let _ = writeln!(out, "\n");
    }
    out
}

/// Renders `runs` and writes them to `path`, replacing any existing file.
pub fn write_report(path: impl AsRef<Path>, runs: &[MethodRun]) -> std::io::Result<()> {
    std::fs::write(path, render(runs))
}
