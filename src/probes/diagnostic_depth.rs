// SPDX-License-Identifier: MIT

//! Category 12: diagnostic depth (spec §4.8 item 12).

use crate::handles::Statement;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};

pub struct DiagnosticDepthCategory;

impl Category for DiagnosticDepthCategory {
    fn name(&self) -> &'static str {
        "Diagnostic Depth"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("diagnostic-record-exposes-a-sqlstate-field", diagnostic_record_exposes_sqlstate_field),
            Probe::new("row-count-reflects-an-insert", row_count_reflects_an_insert),
        ]
    }
}

fn diagnostic_record_exposes_sqlstate_field(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "diagnostic-record-exposes-a-sqlstate-field",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 12",
            )
        }
    };

    match stmt.execute("THIS IS NOT VALID SQL !!! @#$%") {
        Ok(()) => TestResult::fail(
            "diagnostic-record-exposes-a-sqlstate-field",
            "SQLGetDiagRec",
            "the diagnostic record for a failed call carries a 5-character SQLSTATE",
            "malformed SQL unexpectedly executed",
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 12",
        ),
        Err(e) => match e.primary_sqlstate() {
            Some(state) if state.len() == 5 => TestResult::pass(
                "diagnostic-record-exposes-a-sqlstate-field",
                "SQLGetDiagRec",
                "the diagnostic record for a failed call carries a 5-character SQLSTATE",
                state,
                Conformance::Core,
                "spec.md §4.8 item 12",
            ),
            Some(state) => TestResult::fail(
                "diagnostic-record-exposes-a-sqlstate-field",
                "SQLGetDiagRec",
                "the diagnostic record for a failed call carries a 5-character SQLSTATE",
                format!("SQLSTATE {state:?} is not 5 characters"),
                Severity::Warning,
                Conformance::Core,
                "spec.md §4.8 item 12",
            ),
            None => TestResult::fail(
                "diagnostic-record-exposes-a-sqlstate-field",
                "SQLGetDiagRec",
                "the diagnostic record for a failed call carries a 5-character SQLSTATE",
                "no diagnostic record was returned",
                Severity::Error,
                Conformance::Core,
                "spec.md §4.8 item 12",
            ),
        },
    }
}

fn row_count_reflects_an_insert(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "row-count-reflects-an-insert",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 12",
            )
        }
    };

    if let Err(e) = stmt.execute("INSERT INTO odbc_crusher_probe_scratch VALUES (1)") {
        return TestResult::fail(
            "row-count-reflects-an-insert",
            "SQLExecDirect",
            "SQLRowCount reports 1 after an INSERT of one row",
            e.to_string(),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 12",
        );
    }

    match stmt.row_count() {
        Ok(1) => TestResult::pass(
            "row-count-reflects-an-insert",
            "SQLRowCount",
            "SQLRowCount reports 1 after an INSERT of one row",
            "1",
            Conformance::Core,
            "spec.md §4.8 item 12",
        ),
        Ok(n) => TestResult::fail(
            "row-count-reflects-an-insert",
            "SQLRowCount",
            "SQLRowCount reports 1 after an INSERT of one row",
            n.to_string(),
            Severity::Warning,
            Conformance::Core,
            "spec.md §4.8 item 12",
        ),
        Err(e) => TestResult::fail(
            "row-count-reflects-an-insert",
            "SQLRowCount",
            "SQLRowCount reports 1 after an INSERT of one row",
            e.to_string(),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 12",
        ),
    }
}
