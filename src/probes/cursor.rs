// SPDX-License-Identifier: MIT

//! Category 13: cursor behavior (spec §4.8 item 13).

use crate::handles::Statement;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};

pub struct CursorCategory;

impl Category for CursorCategory {
    fn name(&self) -> &'static str {
        "Cursor Behavior"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("fetching-past-the-last-row-reports-end-of-data", fetching_past_the_last_row_reports_end_of_data),
            Probe::new("re-getting-the-same-column-twice-is-consistent", re_getting_the_same_column_twice_is_consistent),
            Probe::new("cursor-type-attribute-round-trips", cursor_type_attribute_round_trips),
        ]
    }
}

fn fetching_past_the_last_row_reports_end_of_data(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "fetching-past-the-last-row-reports-end-of-data",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 13",
            )
        }
    };

    if let Err(e) = stmt.execute("SELECT 1") {
        return TestResult::fail(
            "fetching-past-the-last-row-reports-end-of-data",
            "SQLExecDirect",
            "fetching one row past the end of a one-row result set reports SQL_NO_DATA",
            e.to_string(),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 13",
        );
    }

    let first = stmt.fetch();
    let second = stmt.fetch();
    match (first, second) {
        (Ok(true), Ok(false)) => TestResult::pass(
            "fetching-past-the-last-row-reports-end-of-data",
            "SQLFetch",
            "fetching one row past the end of a one-row result set reports SQL_NO_DATA",
            "first fetch returned a row, second reported end-of-data",
            Conformance::Core,
            "spec.md §4.8 item 13",
        ),
        (Ok(true), Ok(true)) => TestResult::fail(
            "fetching-past-the-last-row-reports-end-of-data",
            "SQLFetch",
            "fetching one row past the end of a one-row result set reports SQL_NO_DATA",
            "a second row was unexpectedly returned",
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 13",
        ),
        (Ok(false), _) => TestResult::fail(
            "fetching-past-the-last-row-reports-end-of-data",
            "SQLFetch",
            "fetching one row past the end of a one-row result set reports SQL_NO_DATA",
            "the first fetch unexpectedly reported end-of-data",
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 13",
        ),
        (Err(e), _) | (_, Err(e)) => TestResult::fail(
            "fetching-past-the-last-row-reports-end-of-data",
            "SQLFetch",
            "fetching one row past the end of a one-row result set reports SQL_NO_DATA",
            e.to_string(),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 13",
        ),
    }
}

fn re_getting_the_same_column_twice_is_consistent(ctx: &ProbeContext) -> TestResult {
    use crate::{driver, sys};

    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "re-getting-the-same-column-twice-is-consistent",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Level1,
                "spec.md §4.8 item 13",
            )
        }
    };

    if stmt.execute("SELECT 1").is_err() || !matches!(stmt.fetch(), Ok(true)) {
        return TestResult::skip_inconclusive(
            "re-getting-the-same-column-twice-is-consistent",
            "SQLExecDirect/SQLFetch",
            "calling SQLGetData twice on the same row and column yields the same value",
            "could not reach a fetched row",
            Conformance::Level1,
            "spec.md §4.8 item 13",
        );
    }

    let mut a: sys::SQLINTEGER = 0;
    let mut b: sys::SQLINTEGER = 0;
    let mut a_ind: sys::SQLLEN = 0;
    let mut b_ind: sys::SQLLEN = 0;
    let rc_a = unsafe {
        driver::SQLGetData(
            stmt.handle(),
            1,
            sys::SQL_C_SLONG,
            &mut a as *mut _ as sys::SQLPOINTER,
            std::mem::size_of::<sys::SQLINTEGER>() as sys::SQLLEN,
            &mut a_ind,
        )
    };
    let rc_b = unsafe {
        driver::SQLGetData(
            stmt.handle(),
            1,
            sys::SQL_C_SLONG,
            &mut b as *mut _ as sys::SQLPOINTER,
            std::mem::size_of::<sys::SQLINTEGER>() as sys::SQLLEN,
            &mut b_ind,
        )
    };

    if !sys::sql_succeeded(rc_a) || !sys::sql_succeeded(rc_b) {
        return TestResult::skip_inconclusive(
            "re-getting-the-same-column-twice-is-consistent",
            "SQLGetData",
            "calling SQLGetData twice on the same row and column yields the same value",
            "a repeated SQLGetData call on the same column returned an error",
            Conformance::Level1,
            "spec.md §4.8 item 13",
        );
    }

    if a == b {
        TestResult::pass(
            "re-getting-the-same-column-twice-is-consistent",
            "SQLGetData",
            "calling SQLGetData twice on the same row and column yields the same value",
            format!("both calls returned {a}"),
            Conformance::Level1,
            "spec.md §4.8 item 13",
        )
    } else {
        TestResult::fail(
            "re-getting-the-same-column-twice-is-consistent",
            "SQLGetData",
            "calling SQLGetData twice on the same row and column yields the same value",
            format!("first call returned {a}, second returned {b}"),
            Severity::Warning,
            Conformance::Level1,
            "spec.md §4.8 item 13",
        )
    }
}

fn cursor_type_attribute_round_trips(ctx: &ProbeContext) -> TestResult {
    use crate::sys;

    let test_name = "cursor-type-attribute-round-trips";
    let function = "SQLSetStmtAttr/SQLGetStmtAttr(SQL_ATTR_CURSOR_TYPE)";
    let expected = "a statement's cursor type can be set to SQL_CURSOR_STATIC and read back unchanged";

    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                test_name,
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Level1,
                "spec.md §4.8 item 13",
            )
        }
    };

    if let Err(e) = stmt.set_cursor_type(sys::SQL_CURSOR_STATIC) {
        return TestResult::fail(
            test_name,
            function,
            expected,
            e.to_string(),
            Severity::Warning,
            Conformance::Level1,
            "spec.md §4.8 item 13",
        );
    }

    match stmt.cursor_type() {
        Ok(t) if t == sys::SQL_CURSOR_STATIC => TestResult::pass(
            test_name,
            function,
            expected,
            "SQL_CURSOR_STATIC",
            Conformance::Level1,
            "spec.md §4.8 item 13",
        ),
        Ok(t) => TestResult::fail(
            test_name,
            function,
            expected,
            format!("read back cursor type {t} instead"),
            Severity::Warning,
            Conformance::Level1,
            "spec.md §4.8 item 13",
        ),
        Err(e) => TestResult::fail(
            test_name,
            function,
            expected,
            e.to_string(),
            Severity::Warning,
            Conformance::Level1,
            "spec.md §4.8 item 13",
        ),
    }
}
