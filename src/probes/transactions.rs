// SPDX-License-Identifier: MIT

//! Category 5: transactions (spec §4.8 item 5).

use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};

pub struct TransactionCategory;

impl Category for TransactionCategory {
    fn name(&self) -> &'static str {
        "Transactions"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("autocommit-can-be-turned-off-and-on", autocommit_can_be_toggled),
            Probe::new("manual-commit-succeeds", manual_commit_succeeds),
            Probe::new("manual-rollback-succeeds", manual_rollback_succeeds),
        ]
    }
}

fn autocommit_can_be_toggled(ctx: &ProbeContext) -> TestResult {
    let saved = match ctx.conn.autocommit() {
        Ok(v) => v,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "autocommit-can-be-turned-off-and-on",
                "SQLGetConnectAttr(SQL_ATTR_AUTOCOMMIT)",
                "autocommit toggles and reads back correctly",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 5",
            )
        }
    };

    let result = (|| -> Result<(), crate::error::OdbcError> {
        ctx.conn.set_autocommit(false)?;
        if ctx.conn.autocommit()? {
            return Err(crate::error::OdbcError::NotConnected);
        }
        ctx.conn.set_autocommit(true)?;
        Ok(())
    })();

    let _ = ctx.conn.set_autocommit(saved);

    match result {
        Ok(()) => TestResult::pass(
            "autocommit-can-be-turned-off-and-on",
            "SQLSetConnectAttr(SQL_ATTR_AUTOCOMMIT)",
            "autocommit toggles and reads back correctly",
            "off then on round-tripped",
            Conformance::Core,
            "spec.md §4.8 item 5",
        ),
        Err(e) => TestResult::fail(
            "autocommit-can-be-turned-off-and-on",
            "SQLSetConnectAttr(SQL_ATTR_AUTOCOMMIT)",
            "autocommit toggles and reads back correctly",
            e.to_string(),
            Severity::Warning,
            Conformance::Core,
            "spec.md §4.8 item 5",
        ),
    }
}

fn manual_commit_succeeds(ctx: &ProbeContext) -> TestResult {
    let saved = ctx.conn.autocommit().unwrap_or(true);
    let _ = ctx.conn.set_autocommit(false);
    let result = ctx.conn.commit();
    let _ = ctx.conn.set_autocommit(saved);

    match result {
        Ok(()) => TestResult::pass(
            "manual-commit-succeeds",
            "SQLEndTran(SQL_COMMIT)",
            "a manual commit with autocommit off succeeds",
            "committed",
            Conformance::Core,
            "spec.md §4.8 item 5",
        ),
        Err(e) => TestResult::fail(
            "manual-commit-succeeds",
            "SQLEndTran(SQL_COMMIT)",
            "a manual commit with autocommit off succeeds",
            e.to_string(),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 5",
        ),
    }
}

fn manual_rollback_succeeds(ctx: &ProbeContext) -> TestResult {
    let saved = ctx.conn.autocommit().unwrap_or(true);
    let _ = ctx.conn.set_autocommit(false);
    let result = ctx.conn.rollback();
    let _ = ctx.conn.set_autocommit(saved);

    match result {
        Ok(()) => TestResult::pass(
            "manual-rollback-succeeds",
            "SQLEndTran(SQL_ROLLBACK)",
            "a manual rollback with autocommit off succeeds",
            "rolled back",
            Conformance::Core,
            "spec.md §4.8 item 5",
        ),
        Err(e) => TestResult::fail(
            "manual-rollback-succeeds",
            "SQLEndTran(SQL_ROLLBACK)",
            "a manual rollback with autocommit off succeeds",
            e.to_string(),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 5",
        ),
    }
}
