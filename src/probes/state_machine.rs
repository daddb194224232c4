// SPDX-License-Identifier: MIT

//! Category 9: state machine (spec §4.8 item 9).

use crate::handles::Statement;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};

pub struct StateMachineCategory;

impl Category for StateMachineCategory {
    fn name(&self) -> &'static str {
        "State Machine"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("fetch-before-execute-is-not-an-error", fetch_before_execute_is_not_an_error),
            Probe::new("two-statements-on-one-connection-are-independent", two_statements_are_independent),
        ]
    }
}

fn fetch_before_execute_is_not_an_error(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "fetch-before-execute-is-not-an-error",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 9",
            )
        }
    };

    match stmt.fetch() {
        Ok(false) => TestResult::pass(
            "fetch-before-execute-is-not-an-error",
            "SQLFetch",
            "fetching before any execute reports end-of-data, not an error",
            "SQL_NO_DATA",
            Conformance::Core,
            "spec.md §4.8 item 9",
        ),
        Ok(true) => TestResult::fail(
            "fetch-before-execute-is-not-an-error",
            "SQLFetch",
            "fetching before any execute reports end-of-data, not an error",
            "a row was unexpectedly returned",
            Severity::Warning,
            Conformance::Core,
            "spec.md §4.8 item 9",
        ),
        Err(e) => TestResult::fail(
            "fetch-before-execute-is-not-an-error",
            "SQLFetch",
            "fetching before any execute reports end-of-data, not an error",
            e.to_string(),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 9",
        ),
    }
}

fn two_statements_are_independent(ctx: &ProbeContext) -> TestResult {
    let a = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "two-statements-on-one-connection-are-independent",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "two statement handles on the same connection are independent",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 9",
            )
        }
    };
    let b = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "two-statements-on-one-connection-are-independent",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "two statement handles on the same connection are independent",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 9",
            )
        }
    };

    if let Err(e) = a.execute("SELECT 1") {
        return TestResult::fail(
            "two-statements-on-one-connection-are-independent",
            "SQLExecDirect",
            "two statement handles on the same connection are independent",
            format!("first statement's execute failed: {e}"),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 9",
        );
    }

    // `b` was never executed, so it must still report end-of-data rather
    // than leaking `a`'s result set.
    match b.fetch() {
        Ok(false) => TestResult::pass(
            "two-statements-on-one-connection-are-independent",
            "SQLFetch",
            "two statement handles on the same connection are independent",
            "unexecuted statement saw no rows from the other statement",
            Conformance::Core,
            "spec.md §4.8 item 9",
        ),
        Ok(true) => TestResult::fail(
            "two-statements-on-one-connection-are-independent",
            "SQLFetch",
            "two statement handles on the same connection are independent",
            "unexecuted statement unexpectedly returned a row",
            Severity::Critical,
            Conformance::Core,
            "spec.md §4.8 item 9",
        ),
        Err(e) => TestResult::fail(
            "two-statements-on-one-connection-are-independent",
            "SQLFetch",
            "two statement handles on the same connection are independent",
            e.to_string(),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 9",
        ),
    }
}
