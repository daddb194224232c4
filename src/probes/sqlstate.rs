// SPDX-License-Identifier: MIT

//! Category 15: SQLSTATE correctness (spec §4.8 item 15, scenario in §8).
//!
//! Each probe drives one concrete mock condition into the specific
//! erroneous call that is documented to produce it, then asserts the
//! exact SQLSTATE class comes back via `SQLGetDiagRec`.

use crate::driver;
use crate::error::check_result;
use crate::handles::Statement;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};
use crate::sys;

pub struct SqlStateCategory;

impl Category for SqlStateCategory {
    fn name(&self) -> &'static str {
        "SQLSTATE Correctness"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("syntax-error-reports-42000-class", syntax_error_reports_42000_class),
            Probe::new("close-cursor-without-one-open-reports-24000", close_cursor_without_one_open_reports_24000),
            Probe::new("get-data-before-fetch-reports-hy010", get_data_before_fetch_reports_hy010),
            Probe::new("get-data-unsupported-c-type-reports-hy003", get_data_unsupported_c_type_reports_hy003),
            Probe::new("get-data-out-of-range-column-reports-07009", get_data_out_of_range_column_reports_07009),
            Probe::new("set-unsupported-stmt-attr-reports-hy092", set_unsupported_stmt_attr_reports_hy092),
            Probe::new("get-info-unknown-type-reports-hy096", get_info_unknown_type_reports_hy096),
        ]
    }
}

fn syntax_error_reports_42000_class(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "syntax-error-reports-42000-class",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 15",
            )
        }
    };

    match stmt.execute("THIS IS NOT VALID SQL !!! @#$%") {
        Ok(()) => TestResult::fail(
            "syntax-error-reports-42000-class",
            "SQLExecDirect",
            "a syntax error reports a SQLSTATE in the 42xxx (syntax error or access rule violation) class",
            "malformed SQL unexpectedly executed",
            Severity::Error,
            Conformance::Core,
            "spec.md §8 scenario 4",
        ),
        Err(e) => match e.primary_sqlstate() {
            Some(state) if state.starts_with("42") => TestResult::pass(
                "syntax-error-reports-42000-class",
                "SQLGetDiagRec",
                "a syntax error reports a SQLSTATE in the 42xxx (syntax error or access rule violation) class",
                state,
                Conformance::Core,
                "spec.md §8 scenario 4",
            ),
            Some(state) => TestResult::fail(
                "syntax-error-reports-42000-class",
                "SQLGetDiagRec",
                "a syntax error reports a SQLSTATE in the 42xxx (syntax error or access rule violation) class",
                state,
                Severity::Warning,
                Conformance::Core,
                "spec.md §8 scenario 4",
            ),
            None => TestResult::fail(
                "syntax-error-reports-42000-class",
                "SQLGetDiagRec",
                "a syntax error reports a SQLSTATE in the 42xxx (syntax error or access rule violation) class",
                "no diagnostic record returned",
                Severity::Error,
                Conformance::Core,
                "spec.md §8 scenario 4",
            ),
        },
    }
}

fn expect_sqlstate(
    test_name: &'static str,
    function: &'static str,
    expected: &'static str,
    want: &str,
    outcome: Result<(), crate::error::OdbcError>,
) -> TestResult {
    match outcome {
        Ok(()) => TestResult::fail(
            test_name,
            function,
            expected,
            "the call unexpectedly succeeded",
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 15",
        ),
        Err(e) => match e.primary_sqlstate() {
            Some(state) if state == want => TestResult::pass(test_name, function, expected, state, Conformance::Core, "spec.md §4.8 item 15"),
            Some(state) => TestResult::fail(
                test_name,
                function,
                expected,
                format!("expected {want}, got {state}"),
                Severity::Warning,
                Conformance::Core,
                "spec.md §4.8 item 15",
            ),
            None => TestResult::fail(
                test_name,
                function,
                expected,
                "no diagnostic record returned",
                Severity::Error,
                Conformance::Core,
                "spec.md §4.8 item 15",
            ),
        },
    }
}

fn close_cursor_without_one_open_reports_24000(ctx: &ProbeContext) -> TestResult {
    let test_name = "close-cursor-without-one-open-reports-24000";
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                test_name,
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "closing a cursor that was never opened reports SQLSTATE 24000",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 15",
            )
        }
    };

    expect_sqlstate(test_name, "SQLCloseCursor", "closing a cursor that was never opened reports SQLSTATE 24000", "24000", stmt.close_cursor())
}

fn get_data_before_fetch_reports_hy010(ctx: &ProbeContext) -> TestResult {
    let test_name = "get-data-before-fetch-reports-hy010";
    let expected = "calling SQLGetData before SQLFetch reports SQLSTATE HY010 (function sequence error)";
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                test_name,
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                expected,
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 15",
            )
        }
    };

    if let Err(e) = stmt.execute("SELECT 1") {
        return TestResult::skip_inconclusive(test_name, "SQLExecDirect", expected, e.to_string(), Conformance::Core, "spec.md §4.8 item 15");
    }

    let mut value: sys::SQLINTEGER = 0;
    let mut indicator: sys::SQLLEN = 0;
    let rc = unsafe {
        driver::SQLGetData(
            stmt.handle(),
            1,
            sys::SQL_C_SLONG,
            &mut value as *mut _ as sys::SQLPOINTER,
            std::mem::size_of::<sys::SQLINTEGER>() as sys::SQLLEN,
            &mut indicator,
        )
    };
    let outcome = check_result(rc, sys::SQL_HANDLE_STMT, stmt.handle(), "SQLGetData");
    expect_sqlstate(test_name, "SQLGetData", expected, "HY010", outcome)
}

fn get_data_unsupported_c_type_reports_hy003(ctx: &ProbeContext) -> TestResult {
    let test_name = "get-data-unsupported-c-type-reports-hy003";
    let expected = "requesting an unrecognized C target type from SQLGetData reports SQLSTATE HY003 (program type out of range)";
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(test_name, "SQLAllocHandle(SQL_HANDLE_STMT)", expected, e.to_string(), Conformance::Core, "spec.md §4.8 item 15")
        }
    };

    if stmt.execute("SELECT 1").is_err() || !matches!(stmt.fetch(), Ok(true)) {
        return TestResult::skip_inconclusive(test_name, "SQLExecDirect/SQLFetch", expected, "could not reach a fetched row", Conformance::Core, "spec.md §4.8 item 15");
    }

    const SQL_C_UNRECOGNIZED: sys::SQLSMALLINT = 999;
    let mut buf = [0u8; 8];
    let mut indicator: sys::SQLLEN = 0;
    let rc = unsafe {
        driver::SQLGetData(
            stmt.handle(),
            1,
            SQL_C_UNRECOGNIZED,
            buf.as_mut_ptr() as sys::SQLPOINTER,
            buf.len() as sys::SQLLEN,
            &mut indicator,
        )
    };
    let outcome = check_result(rc, sys::SQL_HANDLE_STMT, stmt.handle(), "SQLGetData");
    expect_sqlstate(test_name, "SQLGetData", expected, "HY003", outcome)
}

fn get_data_out_of_range_column_reports_07009(ctx: &ProbeContext) -> TestResult {
    let test_name = "get-data-out-of-range-column-reports-07009";
    let expected = "requesting a column index past the row's width from SQLGetData reports SQLSTATE 07009 (invalid descriptor index)";
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(test_name, "SQLAllocHandle(SQL_HANDLE_STMT)", expected, e.to_string(), Conformance::Core, "spec.md §4.8 item 15")
        }
    };

    if stmt.execute("SELECT 1").is_err() || !matches!(stmt.fetch(), Ok(true)) {
        return TestResult::skip_inconclusive(test_name, "SQLExecDirect/SQLFetch", expected, "could not reach a fetched row", Conformance::Core, "spec.md §4.8 item 15");
    }

    let mut value: sys::SQLINTEGER = 0;
    let mut indicator: sys::SQLLEN = 0;
    let rc = unsafe {
        driver::SQLGetData(
            stmt.handle(),
            2,
            sys::SQL_C_SLONG,
            &mut value as *mut _ as sys::SQLPOINTER,
            std::mem::size_of::<sys::SQLINTEGER>() as sys::SQLLEN,
            &mut indicator,
        )
    };
    let outcome = check_result(rc, sys::SQL_HANDLE_STMT, stmt.handle(), "SQLGetData");
    expect_sqlstate(test_name, "SQLGetData", expected, "07009", outcome)
}

fn set_unsupported_stmt_attr_reports_hy092(_ctx: &ProbeContext) -> TestResult {
    let test_name = "set-unsupported-stmt-attr-reports-hy092";
    let expected = "setting an array-parameter statement attribute on a driver that doesn't advertise Level 2 support reports SQLSTATE HY092";

    let env = match crate::handles::Environment::new() {
        Ok(e) => e,
        Err(e) => return TestResult::skip_inconclusive(test_name, "SQLAllocHandle(SQL_HANDLE_ENV)", expected, e.to_string(), Conformance::Core, "spec.md §4.8 item 15"),
    };
    let mut conn = match crate::handles::Connection::new(&env) {
        Ok(c) => c,
        Err(e) => return TestResult::skip_inconclusive(test_name, "SQLAllocHandle(SQL_HANDLE_DBC)", expected, e.to_string(), Conformance::Core, "spec.md §4.8 item 15"),
    };
    if let Err(e) = conn.connect("Driver={Mock ODBC Driver};Mode=NoLevel2;") {
        return TestResult::skip_inconclusive(test_name, "SQLConnect", expected, e.to_string(), Conformance::Core, "spec.md §4.8 item 15");
    }
    let stmt = match Statement::new(&conn) {
        Ok(s) => s,
        Err(e) => return TestResult::skip_inconclusive(test_name, "SQLAllocHandle(SQL_HANDLE_STMT)", expected, e.to_string(), Conformance::Core, "spec.md §4.8 item 15"),
    };

    expect_sqlstate(test_name, "SQLSetStmtAttr(SQL_ATTR_PARAMSET_SIZE)", expected, "HY092", stmt.set_paramset_size(10))
}

fn get_info_unknown_type_reports_hy096(ctx: &ProbeContext) -> TestResult {
    let test_name = "get-info-unknown-type-reports-hy096";
    let expected = "requesting an unrecognized SQLGetInfo information type reports SQLSTATE HY096";

    const SQL_INFO_UNRECOGNIZED: sys::SQLUSMALLINT = 9999;
    let mut buf = [0u8; 32];
    let mut out_len: sys::SQLSMALLINT = 0;
    let rc = unsafe {
        driver::SQLGetInfo(
            ctx.conn.handle(),
            SQL_INFO_UNRECOGNIZED,
            buf.as_mut_ptr() as sys::SQLPOINTER,
            buf.len() as sys::SQLSMALLINT,
            &mut out_len,
        )
    };
    let outcome = check_result(rc, sys::SQL_HANDLE_DBC, ctx.conn.handle(), "SQLGetInfo");
    expect_sqlstate(test_name, "SQLGetInfo", expected, "HY096", outcome)
}
