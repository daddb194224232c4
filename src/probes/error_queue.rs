// SPDX-License-Identifier: MIT

//! Category 8: error queue (spec §4.8 item 8).

use crate::handles::Statement;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};

pub struct ErrorQueueCategory;

impl Category for ErrorQueueCategory {
    fn name(&self) -> &'static str {
        "Error Queue"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("invalid-sql-yields-one-diagnostic-record", invalid_sql_yields_one_diagnostic_record),
            Probe::new("diagnostics-clear-after-a-successful-call", diagnostics_clear_after_a_successful_call),
        ]
    }
}

fn invalid_sql_yields_one_diagnostic_record(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "invalid-sql-yields-one-diagnostic-record",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 8",
            )
        }
    };

    match stmt.execute("THIS IS NOT VALID SQL !!! @#$%") {
        Ok(()) => TestResult::fail(
            "invalid-sql-yields-one-diagnostic-record",
            "SQLExecDirect",
            "executing malformed SQL fails and leaves exactly one diagnostic record",
            "malformed SQL executed without error",
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 8",
        ),
        Err(e) => {
            let count = e.diagnostics().len();
            if count == 1 {
                TestResult::pass(
                    "invalid-sql-yields-one-diagnostic-record",
                    "SQLGetDiagRec",
                    "executing malformed SQL fails and leaves exactly one diagnostic record",
                    "1 diagnostic record",
                    Conformance::Core,
                    "spec.md §4.8 item 8",
                )
            } else {
                TestResult::fail(
                    "invalid-sql-yields-one-diagnostic-record",
                    "SQLGetDiagRec",
                    "executing malformed SQL fails and leaves exactly one diagnostic record",
                    format!("{count} diagnostic records"),
                    Severity::Warning,
                    Conformance::Core,
                    "spec.md §4.8 item 8",
                )
                .with_diagnostic(e.format_diagnostics())
            }
        }
    }
}

fn diagnostics_clear_after_a_successful_call(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "diagnostics-clear-after-a-successful-call",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 8",
            )
        }
    };

    let _ = stmt.execute("THIS IS NOT VALID SQL !!! @#$%");

    match stmt.execute("SELECT 1") {
        Ok(()) => {
            let err = crate::error::extract(
                crate::sys::SQL_HANDLE_STMT,
                stmt.handle(),
                "post-success diagnostic check",
            );
            if err.diagnostics().is_empty() {
                TestResult::pass(
                    "diagnostics-clear-after-a-successful-call",
                    "SQLGetDiagRec",
                    "a successful call clears the diagnostic queue from a prior failure",
                    "no diagnostic records remain",
                    Conformance::Core,
                    "spec.md §4.8 item 8",
                )
            } else {
                TestResult::fail(
                    "diagnostics-clear-after-a-successful-call",
                    "SQLGetDiagRec",
                    "a successful call clears the diagnostic queue from a prior failure",
                    format!("{} stale diagnostic records remain", err.diagnostics().len()),
                    Severity::Warning,
                    Conformance::Core,
                    "spec.md §4.8 item 8",
                )
            }
        }
        Err(e) => TestResult::fail(
            "diagnostics-clear-after-a-successful-call",
            "SQLExecDirect",
            "a successful call clears the diagnostic queue from a prior failure",
            format!("follow-up SELECT 1 failed: {e}"),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 8",
        ),
    }
}
