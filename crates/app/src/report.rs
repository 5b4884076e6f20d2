//! Console report.

use std::fmt::Write;

use crate::harness::ScenarioOutcome;

/// Pass/fail counts over a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    /// Scenarios run.
    pub total: usize,
    /// Scenarios whose assertions all passed.
    pub passed: usize,
    /// Scenarios that failed or could not complete.
    pub failed: usize,
}

impl Summary {
    /// Counts outcomes.
    #[must_use]
    pub fn of(outcomes: &[ScenarioOutcome]) -> Self {
        let passed = outcomes.iter().filter(|o| o.passed()).count();
        Self {
            total: outcomes.len(),
            passed,
            failed: outcomes.len() - passed,
        }
    }

    /// True when nothing failed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Renders one line per scenario, failure details indented below it.
#[must_use]
pub fn render(outcomes: &[ScenarioOutcome]) -> String {
    let mut out = String::new();

    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => {
                let mark = if report.passed() { "PASS" } else { "FAIL" };
                let _ = writeln!(
                    out,
                    "{mark} {} ({}, {}/{} assertions)",
                    outcome.name, report.status_line, report.results.passed, report.results.total
                );
                for failure in report.results.failures() {
                    let _ = writeln!(
                        out,
                        "     - {}: {}",
                        failure.assertion.description(),
                        failure.message().unwrap_or_default()
                    );
                }
            }
            Err(e) => {
                let _ = writeln!(out, "ERR  {}: {e}", outcome.name);
            }
        }
    }

    let summary = Summary::of(outcomes);
    let _ = writeln!(
        out,
        "\n{} scenarios, {} passed, {} failed",
        summary.total, summary.passed, summary.failed
    );
    out
}
