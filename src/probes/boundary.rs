// SPDX-License-Identifier: MIT

//! Category 16: boundary conditions (spec §4.8 item 16).

use crate::handles::Statement;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};
use crate::{driver, sys};

pub struct BoundaryCategory;

impl Category for BoundaryCategory {
    fn name(&self) -> &'static str {
        "Boundary Conditions"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("zero-length-info-buffer-does-not-crash", zero_length_info_buffer_does_not_crash),
            Probe::new("zero-length-get-data-buffer-does-not-crash", zero_length_get_data_buffer_does_not_crash),
            Probe::new("empty-sql-text-is-rejected-not-crashed", empty_sql_text_is_rejected_not_crashed),
        ]
    }
}

fn zero_length_info_buffer_does_not_crash(ctx: &ProbeContext) -> TestResult {
    let mut out_len: sys::SQLSMALLINT = 0;
    let rc = unsafe {
        driver::SQLGetInfo(
            ctx.conn.handle(),
            sys::SQL_DBMS_NAME,
            std::ptr::null_mut(),
            0,
            &mut out_len,
        )
    };

    if sys::sql_succeeded(rc) || rc == sys::SQL_SUCCESS_WITH_INFO {
        TestResult::pass(
            "zero-length-info-buffer-does-not-crash",
            "SQLGetInfo",
            "a zero-length output buffer is handled without a crash and without writing through a null pointer",
            format!("returned {rc}, reported length {out_len}"),
            Conformance::Core,
            "spec.md §4.8 item 16",
        )
    } else {
        TestResult::fail(
            "zero-length-info-buffer-does-not-crash",
            "SQLGetInfo",
            "a zero-length output buffer is handled without a crash and without writing through a null pointer",
            format!("unexpected return code {rc}"),
            Severity::Warning,
            Conformance::Core,
            "spec.md §4.8 item 16",
        )
    }
}

fn zero_length_get_data_buffer_does_not_crash(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "zero-length-get-data-buffer-does-not-crash",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 16",
            )
        }
    };

    if stmt.execute("SELECT 1").is_err() || !matches!(stmt.fetch(), Ok(true)) {
        return TestResult::skip_inconclusive(
            "zero-length-get-data-buffer-does-not-crash",
            "SQLExecDirect/SQLFetch",
            "a zero-length output buffer is handled without a crash and without writing through a null pointer",
            "could not reach a fetched row",
            Conformance::Core,
            "spec.md §4.8 item 16",
        );
    }

    let mut indicator: sys::SQLLEN = 0;
    let rc = unsafe {
        driver::SQLGetData(
            stmt.handle(),
            1,
            sys::SQL_C_CHAR,
            std::ptr::null_mut(),
            0,
            &mut indicator,
        )
    };

    if sys::sql_succeeded(rc) {
        TestResult::pass(
            "zero-length-get-data-buffer-does-not-crash",
            "SQLGetData",
            "a zero-length output buffer is handled without a crash and without writing through a null pointer",
            format!("returned {rc}, indicator {indicator}"),
            Conformance::Core,
            "spec.md §4.8 item 16",
        )
    } else {
        TestResult::fail(
            "zero-length-get-data-buffer-does-not-crash",
            "SQLGetData",
            "a zero-length output buffer is handled without a crash and without writing through a null pointer",
            format!("unexpected return code {rc}"),
            Severity::Warning,
            Conformance::Core,
            "spec.md §4.8 item 16",
        )
    }
}

fn empty_sql_text_is_rejected_not_crashed(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "empty-sql-text-is-rejected-not-crashed",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 16",
            )
        }
    };

    // Either outcome — success on an effective no-op, or a clean error — is
    // acceptable; a crash is not.
    match stmt.execute("") {
        Ok(()) | Err(_) => TestResult::pass(
            "empty-sql-text-is-rejected-not-crashed",
            "SQLExecDirect",
            "executing empty SQL text returns a normal success or error, never a crash",
            "returned without crashing",
            Conformance::Core,
            "spec.md §4.8 item 16",
        ),
    }
}
