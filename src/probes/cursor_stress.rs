// SPDX-License-Identifier: MIT

//! Category 21: cursor lifecycle stress (spec §4.8 item 21).

use crate::handles::Statement;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};

const RAPID_CYCLE_COUNT: usize = 200;

pub struct CursorStressCategory;

impl Category for CursorStressCategory {
    fn name(&self) -> &'static str {
        "Cursor Lifecycle Stress"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("rapid-open-close-cycles-do-not-drift", rapid_open_close_cycles_do_not_drift),
            Probe::new("concurrent-statements-do-not-cross-contaminate", concurrent_statements_do_not_cross_contaminate),
        ]
    }
}

/// Opens and closes the same statement's cursor `RAPID_CYCLE_COUNT`
/// times, checking after every cycle that exactly one row is still
/// visible. A driver that leaks cursor state across `SQLFreeStmt(SQL_CLOSE)`
/// would show this as a growing or shrinking row count over the run —
/// "drift" in the spec's terms.
fn rapid_open_close_cycles_do_not_drift(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "rapid-open-close-cycles-do-not-drift",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 21",
            )
        }
    };

    for cycle in 0..RAPID_CYCLE_COUNT {
        if let Err(e) = stmt.execute("SELECT 1") {
            return TestResult::fail(
                "rapid-open-close-cycles-do-not-drift",
                "SQLExecDirect",
                format!("{RAPID_CYCLE_COUNT} rapid open/close cycles each see exactly one row"),
                format!("cycle {cycle} failed to execute: {e}"),
                Severity::Error,
                Conformance::Core,
                "spec.md §4.8 item 21",
            );
        }
        let mut rows = 0;
        loop {
            match stmt.fetch() {
                Ok(true) => rows += 1,
                Ok(false) => break,
                Err(e) => {
                    return TestResult::fail(
                        "rapid-open-close-cycles-do-not-drift",
                        "SQLFetch",
                        format!("{RAPID_CYCLE_COUNT} rapid open/close cycles each see exactly one row"),
                        format!("cycle {cycle} failed to fetch: {e}"),
                        Severity::Error,
                        Conformance::Core,
                        "spec.md §4.8 item 21",
                    )
                }
            }
        }
        if rows != 1 {
            return TestResult::fail(
                "rapid-open-close-cycles-do-not-drift",
                "SQLFetch",
                format!("{RAPID_CYCLE_COUNT} rapid open/close cycles each see exactly one row"),
                format!("cycle {cycle} saw {rows} rows"),
                Severity::Critical,
                Conformance::Core,
                "spec.md §4.8 item 21",
            );
        }
        let _ = stmt.close_cursor();
    }

    TestResult::pass(
        "rapid-open-close-cycles-do-not-drift",
        "SQLExecDirect/SQLFetch/SQLCloseCursor",
        format!("{RAPID_CYCLE_COUNT} rapid open/close cycles each see exactly one row"),
        format!("{RAPID_CYCLE_COUNT} cycles, no drift"),
        Conformance::Core,
        "spec.md §4.8 item 21",
    )
}

fn concurrent_statements_do_not_cross_contaminate(ctx: &ProbeContext) -> TestResult {
    let a = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "concurrent-statements-do-not-cross-contaminate",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "interleaving execute/fetch across two statements on one connection does not cross-contaminate state",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 21",
            )
        }
    };
    let b = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "concurrent-statements-do-not-cross-contaminate",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "interleaving execute/fetch across two statements on one connection does not cross-contaminate state",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 21",
            )
        }
    };

    for stmt in [&a, &b] {
        if let Err(e) = stmt.execute("SELECT 1") {
            return TestResult::fail(
                "concurrent-statements-do-not-cross-contaminate",
                "SQLExecDirect",
                "interleaving execute/fetch across two statements on one connection does not cross-contaminate state",
                e.to_string(),
                Severity::Error,
                Conformance::Core,
                "spec.md §4.8 item 21",
            );
        }
    }

    // Interleave: fetch a's row, then b's row, then confirm both are
    // exhausted independently.
    let a_row = a.fetch();
    let b_row = b.fetch();
    let a_done = a.fetch();
    let b_done = b.fetch();

    match (a_row, b_row, a_done, b_done) {
        (Ok(true), Ok(true), Ok(false), Ok(false)) => TestResult::pass(
            "concurrent-statements-do-not-cross-contaminate",
            "SQLFetch",
            "interleaving execute/fetch across two statements on one connection does not cross-contaminate state",
            "both statements independently produced one row then end-of-data",
            Conformance::Core,
            "spec.md §4.8 item 21",
        ),
        other => TestResult::fail(
            "concurrent-statements-do-not-cross-contaminate",
            "SQLFetch",
            "interleaving execute/fetch across two statements on one connection does not cross-contaminate state",
            format!("{other:?}"),
            Severity::Critical,
            Conformance::Core,
            "spec.md §4.8 item 21",
        ),
    }
}
