// SPDX-License-Identifier: MIT

//! Category 2: statement behaviors (spec §4.8 item 2).

use crate::handles::Statement;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};

pub struct StatementCategory;

impl Category for StatementCategory {
    fn name(&self) -> &'static str {
        "Statement"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("execute-direct-succeeds", execute_direct_succeeds),
            Probe::new("prepare-then-execute-succeeds", prepare_then_execute_succeeds),
            Probe::new("statement-is-reusable-after-recycle", statement_is_reusable_after_recycle),
        ]
    }
}

fn execute_direct_succeeds(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "execute-direct-succeeds",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.2",
            )
        }
    };

    match stmt.execute("SELECT 1") {
        Ok(()) => TestResult::pass(
            "execute-direct-succeeds",
            "SQLExecDirect",
            "SELECT 1 executes without error",
            "executed",
            Conformance::Core,
            "spec.md §4.8 item 2",
        ),
        Err(e) => TestResult::fail(
            "execute-direct-succeeds",
            "SQLExecDirect",
            "SELECT 1 executes without error",
            e.to_string(),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 2",
        )
        .with_diagnostic(e.format_diagnostics()),
    }
}

fn prepare_then_execute_succeeds(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "prepare-then-execute-succeeds",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.2",
            )
        }
    };

    if let Err(e) = stmt.prepare("SELECT 1") {
        return TestResult::fail(
            "prepare-then-execute-succeeds",
            "SQLPrepare",
            "prepare followed by execute both succeed",
            e.to_string(),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 2",
        );
    }

    match stmt.execute_prepared() {
        Ok(()) => TestResult::pass(
            "prepare-then-execute-succeeds",
            "SQLExecute",
            "prepare followed by execute both succeed",
            "executed",
            Conformance::Core,
            "spec.md §4.8 item 2",
        ),
        Err(e) => TestResult::fail(
            "prepare-then-execute-succeeds",
            "SQLExecute",
            "prepare followed by execute both succeed",
            e.to_string(),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 2",
        ),
    }
}

fn statement_is_reusable_after_recycle(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "statement-is-reusable-after-recycle",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.3",
            )
        }
    };

    if let Err(e) = stmt.execute("SELECT 1") {
        return TestResult::fail(
            "statement-is-reusable-after-recycle",
            "SQLExecDirect",
            "a statement can be executed a second time after recycling",
            format!("first execute failed: {e}"),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.3",
        );
    }
    stmt.recycle();

    match stmt.execute("SELECT 1") {
        Ok(()) => TestResult::pass(
            "statement-is-reusable-after-recycle",
            "SQLExecDirect",
            "a statement can be executed a second time after recycling",
            "second execute succeeded",
            Conformance::Core,
            "spec.md §4.3",
        ),
        Err(e) => TestResult::fail(
            "statement-is-reusable-after-recycle",
            "SQLExecDirect",
            "a statement can be executed a second time after recycling",
            e.to_string(),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.3",
        ),
    }
}
