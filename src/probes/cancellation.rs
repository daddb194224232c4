// SPDX-License-Identifier: MIT

//! Category 23: cancellation (spec §4.8 item 23).

use crate::handles::Statement;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};

pub struct CancellationCategory;

impl Category for CancellationCategory {
    fn name(&self) -> &'static str {
        "Cancellation"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("cancel-on-an-idle-statement-does-not-error", cancel_on_an_idle_statement_does_not_error),
            Probe::new("cancel-resets-the-statement-for-reuse", cancel_resets_the_statement_for_reuse),
        ]
    }
}

fn cancel_on_an_idle_statement_does_not_error(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "cancel-on-an-idle-statement-does-not-error",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 23",
            )
        }
    };

    match stmt.cancel() {
        Ok(()) => TestResult::pass(
            "cancel-on-an-idle-statement-does-not-error",
            "SQLCancel",
            "calling SQLCancel on a statement with no operation in progress succeeds as a no-op",
            "succeeded",
            Conformance::Core,
            "spec.md §4.8 item 23",
        ),
        Err(e) => TestResult::fail(
            "cancel-on-an-idle-statement-does-not-error",
            "SQLCancel",
            "calling SQLCancel on a statement with no operation in progress succeeds as a no-op",
            e.to_string(),
            Severity::Warning,
            Conformance::Core,
            "spec.md §4.8 item 23",
        ),
    }
}

/// Per spec §4.8, `SQLCancel` on a statement that has an open result set
/// is expected to behave like closing the cursor: the statement must be
/// immediately reusable for a fresh execute.
fn cancel_resets_the_statement_for_reuse(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "cancel-resets-the-statement-for-reuse",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 23",
            )
        }
    };

    if let Err(e) = stmt.execute("SELECT 1") {
        return TestResult::fail(
            "cancel-resets-the-statement-for-reuse",
            "SQLExecDirect",
            "a statement is reusable for a fresh execute after SQLCancel",
            e.to_string(),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 23",
        );
    }

    if let Err(e) = stmt.cancel() {
        return TestResult::fail(
            "cancel-resets-the-statement-for-reuse",
            "SQLCancel",
            "a statement is reusable for a fresh execute after SQLCancel",
            e.to_string(),
            Severity::Warning,
            Conformance::Core,
            "spec.md §4.8 item 23",
        );
    }

    match stmt.execute("SELECT 1") {
        Ok(()) => TestResult::pass(
            "cancel-resets-the-statement-for-reuse",
            "SQLExecDirect",
            "a statement is reusable for a fresh execute after SQLCancel",
            "second execute after cancel succeeded",
            Conformance::Core,
            "spec.md §4.8 item 23",
        ),
        Err(e) => TestResult::fail(
            "cancel-resets-the-statement-for-reuse",
            "SQLExecDirect",
            "a statement is reusable for a fresh execute after SQLCancel",
            format!("second execute after cancel failed: {e}"),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 23",
        ),
    }
}
