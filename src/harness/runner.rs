// SPDX-License-Identifier: MIT

//! Drives the probe catalog against a connected driver (spec §4.7).
//!
//! Per-probe flow: start a timer, enter the crash guard, run the probe
//! body inside it, exit the guard, and if the guard caught a fault,
//! replace whatever the probe body produced with a synthesized `Error`
//! result describing the signal. The timer always stops and the result is
//! always appended — one probe crashing must never stop the run.

use crate::capability::CapabilitySnapshot;
use crate::crash_guard::execute_with_crash_guard;
use crate::handles::Connection;
use crate::harness::category::{Category, ProbeContext};
use crate::harness::result::{Conformance, Severity, TestResult, TestStatus};
use serde::Serialize;
use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::{info, warn};

/// Tallies over one category's probe results, used by sinks for the
/// per-category summary line and by the overall run summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryTally {
    pub pass: usize,
    pub fail: usize,
    pub skip_unsupported: usize,
    pub skip_inconclusive: usize,
    pub error: usize,
}

impl CategoryTally {
    fn record(&mut self, status: TestStatus) {
        match status {
            TestStatus::Pass => self.pass += 1,
            TestStatus::Fail => self.fail += 1,
            TestStatus::SkipUnsupported => self.skip_unsupported += 1,
            TestStatus::SkipInconclusive => self.skip_inconclusive += 1,
            TestStatus::Error => self.error += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.pass + self.fail + self.skip_unsupported + self.skip_inconclusive + self.error
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryReport {
    pub category: String,
    pub results: Vec<TestResult>,
    pub tally: CategoryTally,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct RunSummary {
    pub categories: usize,
    pub tally: CategoryTally,
    pub highest_severity_failure: Option<Severity>,
}

/// Runs every probe in every registered category, in order, against an
/// already-connected `conn`. Each category's results are handed to `on_category`
/// as soon as that category finishes, so a [`crate::sinks::Sink`] can stream
/// output instead of waiting for the whole run.
pub fn run_categories(
    conn: &Connection,
    connection_string: &str,
    capabilities: &CapabilitySnapshot,
    categories: &[Box<dyn Category>],
    mut on_category: impl FnMut(&CategoryReport),
) -> RunSummary {
    let ctx = ProbeContext { conn, capabilities, connection_string };
    let mut summary = RunSummary {
        categories: categories.len(),
        ..Default::default()
    };

    for category in categories {
        let mut report = CategoryReport {
            category: category.name().to_string(),
            results: Vec::new(),
            tally: CategoryTally::default(),
        };

        for probe in category.probes() {
            let result = run_one_probe(&ctx, category.name(), probe.name, probe.run);
            report.tally.record(result.status);
            summary.tally.record(result.status);
            if result.status == TestStatus::Fail || result.status == TestStatus::Error {
                summary.highest_severity_failure = Some(
                    summary
                        .highest_severity_failure
                        .map_or(result.severity, |s| s.max(result.severity)),
                );
            }
            report.results.push(result);
        }

        info!(category = category.name(), total = report.tally.total(), "category complete");
        on_category(&report);
    }

    summary
}

fn run_one_probe(
    ctx: &ProbeContext,
    category_name: &str,
    probe_name: &'static str,
    probe: crate::harness::category::ProbeFn,
) -> TestResult {
    let started = Instant::now();
    let outcome: RefCell<Option<TestResult>> = RefCell::new(None);

    let guard_result = execute_with_crash_guard(|| {
        let probe_result = panic::catch_unwind(AssertUnwindSafe(|| probe(ctx)));
        let result = match probe_result {
            Ok(r) => r,
            Err(payload) => {
                let message = panic_message(&payload);
                warn!(category = category_name, probe = probe_name, panic = %message, "probe panicked");
                TestResult::new(
                    probe_name,
                    "unknown",
                    TestStatus::Error,
                    "probe completes without panicking",
                    format!("probe panicked: {message}"),
                    Severity::Error,
                    Conformance::Core,
                    "n/a",
                )
            }
        };
        *outcome.borrow_mut() = Some(result);
    });

    let elapsed_us = started.elapsed().as_micros() as u64;

    let mut result = if guard_result.crashed {
        warn!(category = category_name, probe = probe_name, signal = guard_result.crash_code, "probe crashed the driver");
        TestResult::new(
            probe_name,
            "unknown",
            TestStatus::Error,
            "driver call returns without faulting",
            guard_result.description.clone(),
            Severity::Critical,
            Conformance::Core,
            "n/a",
        )
        .with_diagnostic(guard_result.description)
    } else {
        outcome.into_inner().unwrap_or_else(|| {
            TestResult::new(
                probe_name,
                "unknown",
                TestStatus::Error,
                "probe records a result",
                "probe body returned without recording a result",
                Severity::Error,
                Conformance::Core,
                "n/a",
            )
        })
    };

    result.duration_us = elapsed_us;
    result
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(all(test, feature = "mock-driver"))]
mod tests {
    use super::*;
    use crate::capability::CapabilitySnapshot;
    use crate::handles::Environment;
    use crate::harness::category::Probe;
    use crate::mock;

    struct AlwaysPass;
    impl Category for AlwaysPass {
        fn name(&self) -> &'static str {
            "always-pass"
        }
        fn probes(&self) -> Vec<Probe> {
            vec![Probe::new("trivial", |_ctx| {
                TestResult::pass("trivial", "SQLConnect", "ok", "ok", Conformance::Core, "n/a")
            })]
        }
    }

    struct AlwaysPanics;
    impl Category for AlwaysPanics {
        fn name(&self) -> &'static str {
            "always-panics"
        }
        fn probes(&self) -> Vec<Probe> {
            vec![Probe::new("boom", |_ctx| panic!("deliberate"))]
        }
    }

    #[test]
    fn panicking_probe_becomes_an_error_result_not_a_crash() {
        mock::reset();
        let env = Environment::new().unwrap();
        let mut conn = Connection::new(&env).unwrap();
        conn.connect("Driver={Mock ODBC Driver};Mode=Success;").unwrap();
        let caps = CapabilitySnapshot::default();

        let categories: Vec<Box<dyn Category>> = vec![Box::new(AlwaysPanics)];
        let mut seen = Vec::new();
        let summary = run_categories(&conn, "Driver={Mock ODBC Driver};Mode=Success;", &caps, &categories, |report| {
            seen.extend(report.results.clone());
        });

        assert_eq!(summary.tally.error, 1);
        assert_eq!(seen[0].status, TestStatus::Error);
    }

    #[test]
    fn passing_probe_is_tallied() {
        mock::reset();
        let env = Environment::new().unwrap();
        let mut conn = Connection::new(&env).unwrap();
        conn.connect("Driver={Mock ODBC Driver};Mode=Success;").unwrap();
        let caps = CapabilitySnapshot::default();

        let categories: Vec<Box<dyn Category>> = vec![Box::new(AlwaysPass)];
        let summary = run_categories(&conn, "Driver={Mock ODBC Driver};Mode=Success;", &caps, &categories, |_| {});
        assert_eq!(summary.tally.pass, 1);
        assert!(summary.highest_severity_failure.is_none());
    }
}
