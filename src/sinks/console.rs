// SPDX-License-Identifier: MIT

//! Human-readable console sink (spec §4.9, console report layout).

use crate::capability::CapabilitySnapshot;
use crate::harness::{CategoryReport, RunSummary, Severity, TestResult, TestStatus};
use crate::sinks::Sink;
use std::io::Write;

const RULE: &str = "--------------------------------------------------------------------";

/// Prints a banner, capability summary, per-probe status lines, and a
/// final severity-ordered failure summary to any `Write` target (a
/// plain `Write` rather than a hard dependency on stdout so tests can
/// capture output into a `Vec<u8>`).
pub struct ConsoleSink<W: Write> {
    out: W,
    verbose: bool,
    failures: Vec<TestResult>,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        ConsoleSink {
            out,
            verbose,
            failures: Vec::new(),
        }
    }

    fn status_label(status: TestStatus) -> &'static str {
        match status {
            TestStatus::Pass => "[PASS]",
            TestStatus::Fail => "[FAIL]",
            TestStatus::SkipUnsupported => "[N/S] ",
            TestStatus::SkipInconclusive => "[INC] ",
            TestStatus::Error => "[ERR!]",
        }
    }

    fn write_probe_line(&mut self, result: &TestResult) {
        let label = Self::status_label(result.status);
        let _ = writeln!(
            self.out,
            "  {label} {:<55} {:>7.2}ms",
            result.test_name,
            result.duration_us as f64 / 1000.0
        );
        if self.verbose || matches!(result.status, TestStatus::Fail | TestStatus::Error) {
            let _ = writeln!(self.out, "        expected: {}", result.expected);
            let _ = writeln!(self.out, "        actual:   {}", result.actual);
            if let Some(diag) = &result.diagnostic {
                let _ = writeln!(self.out, "        diagnostic: {diag}");
            }
            if let Some(suggestion) = &result.suggestion {
                let _ = writeln!(self.out, "        suggestion: {suggestion}");
            }
            let _ = writeln!(self.out, "        spec: {}", result.spec_reference);
        }
    }
}

impl<W: Write> Sink for ConsoleSink<W> {
    fn start(&mut self, connection_string: &str, capabilities: &CapabilitySnapshot) {
        let _ = writeln!(self.out, "{RULE}");
        let _ = writeln!(self.out, " ODBC driver conformance probe");
        let _ = writeln!(self.out, "{RULE}");
        let _ = writeln!(self.out, "  connection: {connection_string}");
        let _ = writeln!(
            self.out,
            "  driver:     {} {}",
            capabilities.driver_name.as_deref().unwrap_or("(unreported)"),
            capabilities.driver_version.as_deref().unwrap_or("")
        );
        let _ = writeln!(
            self.out,
            "  dbms:       {} {}",
            capabilities.dbms_name.as_deref().unwrap_or("(unreported)"),
            capabilities.dbms_version.as_deref().unwrap_or("")
        );
        let _ = writeln!(
            self.out,
            "  odbc ver:   {}",
            capabilities.odbc_version.as_deref().unwrap_or("(unreported)")
        );
        let _ = writeln!(
            self.out,
            "  types advertised: {}    functions advertised: {}",
            capabilities.types.len(),
            capabilities.functions.supported.len()
        );
        let _ = writeln!(self.out, "{RULE}");
    }

    fn report_category(&mut self, report: &CategoryReport) {
        let _ = writeln!(self.out, "\n{}", report.category);
        for result in &report.results {
            self.write_probe_line(result);
            if matches!(result.status, TestStatus::Fail | TestStatus::Error) {
                self.failures.push(result.clone());
            }
        }
        let t = &report.tally;
        let _ = writeln!(
            self.out,
            "  -> {} pass, {} fail, {} not-supported, {} inconclusive, {} error",
            t.pass, t.fail, t.skip_unsupported, t.skip_inconclusive, t.error
        );
    }

    fn finish(&mut self, summary: &RunSummary) {
        let _ = writeln!(self.out, "\n{RULE}");
        let _ = writeln!(self.out, " Summary");
        let _ = writeln!(self.out, "{RULE}");
        let t = &summary.tally;
        let _ = writeln!(
            self.out,
            "  {} categories, {} probes: {} pass, {} fail, {} not-supported, {} inconclusive, {} error",
            summary.categories,
            t.total(),
            t.pass,
            t.fail,
            t.skip_unsupported,
            t.skip_inconclusive,
            t.error
        );

        if !self.failures.is_empty() {
            self.failures.sort_by(|a, b| b.severity.cmp(&a.severity));
            let _ = writeln!(self.out, "\n  Failures, most severe first:");
            for f in &self.failures {
                let _ = writeln!(
                    self.out,
                    "   [{:?}] {} — {} ({})",
                    f.severity, f.test_name, f.actual, f.spec_reference
                );
            }
        }

        if let Some(highest) = summary.highest_severity_failure {
            let verdict = if highest >= Severity::Error {
                "FAIL"
            } else {
                "PASS WITH WARNINGS"
            };
            let _ = writeln!(self.out, "\n  Verdict: {verdict}");
        } else {
            let _ = writeln!(self.out, "\n  Verdict: PASS");
        }
    }
}

#[cfg(all(test, feature = "mock-driver"))]
mod tests {
    use super::*;
    use crate::harness::{CategoryTally, Conformance};

    fn sample_report() -> CategoryReport {
        let mut tally = CategoryTally::default();
        tally.pass = 1;
        tally.fail = 1;
        CategoryReport {
            category: "Connection".to_string(),
            results: vec![
                TestResult::pass("c1", "SQLConnect", "connects", "connected", Conformance::Core, "§4.2"),
                TestResult::fail("c2", "SQLConnect", "rejects double connect", "connected twice", Severity::Error, Conformance::Core, "§4.2"),
            ],
            tally,
        }
    }

    #[test]
    fn start_prints_connection_and_driver_identity() {
        let mut buf = Vec::new();
        let mut sink = ConsoleSink::new(&mut buf, false);
        sink.start("Driver={Mock};", &CapabilitySnapshot::default());
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Driver={Mock};"));
    }

    #[test]
    fn failing_probes_always_show_detail_even_outside_verbose_mode() {
        let mut buf = Vec::new();
        let mut sink = ConsoleSink::new(&mut buf, false);
        sink.report_category(&sample_report());
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("expected: rejects double connect"));
    }

    #[test]
    fn finish_sorts_failures_most_severe_first() {
        let mut buf = Vec::new();
        let mut sink = ConsoleSink::new(&mut buf, false);
        sink.report_category(&sample_report());
        let mut summary = RunSummary {
            categories: 1,
            ..Default::default()
        };
        summary.tally.pass = 1;
        summary.tally.fail = 1;
        summary.highest_severity_failure = Some(Severity::Error);
        sink.finish(&summary);
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Verdict: FAIL"));
    }
}
