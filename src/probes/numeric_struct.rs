// SPDX-License-Identifier: MIT

//! Category 19: `SQL_NUMERIC_STRUCT` binding (spec §4.8 item 19).
//!
//! `numeric_struct_value_round_trips` binds a `SQL_NUMERIC_STRUCT`
//! parameter, executes `SELECT ?`, fetches the single row, and reads the
//! column back out via `SQLGetData(SQL_C_NUMERIC)`, confirming the raw
//! 19-byte struct comes back unchanged.

use crate::handles::Statement;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};
use crate::{driver, sys};

pub struct NumericStructCategory;

impl Category for NumericStructCategory {
    fn name(&self) -> &'static str {
        "Numeric Struct Binding"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("numeric-struct-parameter-binds-without-error", numeric_struct_parameter_binds_without_error),
            Probe::new("numeric-struct-value-round-trips", numeric_struct_value_round_trips),
        ]
    }
}

/// Layout mirrors the standard `SQL_NUMERIC_STRUCT`: precision, scale,
/// sign, then a 16-byte little-endian unsigned magnitude.
#[repr(C)]
struct NumericStruct {
    precision: u8,
    scale: i8,
    sign: u8,
    val: [u8; 16],
}

fn numeric_struct_parameter_binds_without_error(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "numeric-struct-parameter-binds-without-error",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Level2,
                "spec.md §4.8 item 19",
            )
        }
    };

    let mut numeric = NumericStruct {
        precision: 5,
        scale: 2,
        sign: 1,
        val: [0u8; 16],
    };
    numeric.val[0] = 100; // 1.00 at scale 2

    let mut indicator: sys::SQLLEN = std::mem::size_of::<NumericStruct>() as sys::SQLLEN;
    let rc = unsafe {
        driver::SQLBindParameter(
            stmt.handle(),
            1,
            sys::SQL_PARAM_INPUT,
            sys::SQL_C_NUMERIC,
            sys::SQL_NUMERIC,
            numeric.precision as sys::SQLULEN,
            numeric.scale as sys::SQLSMALLINT,
            &mut numeric as *mut NumericStruct as sys::SQLPOINTER,
            std::mem::size_of::<NumericStruct>() as sys::SQLLEN,
            &mut indicator,
        )
    };

    if sys::sql_succeeded(rc) {
        TestResult::pass(
            "numeric-struct-parameter-binds-without-error",
            "SQLBindParameter",
            "a SQL_NUMERIC_STRUCT parameter binds successfully with precision 5 and scale 2",
            "accepted",
            Conformance::Level2,
            "spec.md §4.8 item 19",
        )
    } else {
        TestResult::fail(
            "numeric-struct-parameter-binds-without-error",
            "SQLBindParameter",
            "a SQL_NUMERIC_STRUCT parameter binds successfully with precision 5 and scale 2",
            format!("SQLBindParameter returned {rc}"),
            Severity::Error,
            Conformance::Level2,
            "spec.md §4.8 item 19",
        )
    }
}

fn numeric_struct_value_round_trips(ctx: &ProbeContext) -> TestResult {
    let test_name = "numeric-struct-value-round-trips";
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                test_name,
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Level2,
                "spec.md §4.8 item 19",
            )
        }
    };

    let mut original = NumericStruct {
        precision: 9,
        scale: 3,
        sign: 1,
        val: [0u8; 16],
    };
    original.val[0] = 0xE8; // 123.456 at scale 3, little-endian magnitude
    original.val[1] = 0x01;

    let mut indicator: sys::SQLLEN = std::mem::size_of::<NumericStruct>() as sys::SQLLEN;
    let rc = unsafe {
        driver::SQLBindParameter(
            stmt.handle(),
            1,
            sys::SQL_PARAM_INPUT,
            sys::SQL_C_NUMERIC,
            sys::SQL_NUMERIC,
            original.precision as sys::SQLULEN,
            original.scale as sys::SQLSMALLINT,
            &mut original as *mut NumericStruct as sys::SQLPOINTER,
            std::mem::size_of::<NumericStruct>() as sys::SQLLEN,
            &mut indicator,
        )
    };
    if !sys::sql_succeeded(rc) {
        return TestResult::fail(
            test_name,
            "SQLBindParameter",
            "a SQL_NUMERIC_STRUCT parameter binds and round-trips through SELECT ?",
            format!("SQLBindParameter returned {rc}"),
            Severity::Error,
            Conformance::Level2,
            "spec.md §4.8 item 19",
        );
    }

    if let Err(e) = stmt.execute("SELECT ?") {
        return TestResult::fail(
            test_name,
            "SQLExecDirect",
            "a SQL_NUMERIC_STRUCT parameter binds and round-trips through SELECT ?",
            e.to_string(),
            Severity::Error,
            Conformance::Level2,
            "spec.md §4.8 item 19",
        );
    }

    match stmt.fetch() {
        Ok(true) => {}
        Ok(false) => {
            return TestResult::fail(
                test_name,
                "SQLFetch",
                "a SQL_NUMERIC_STRUCT parameter binds and round-trips through SELECT ?",
                "no row was returned",
                Severity::Error,
                Conformance::Level2,
                "spec.md §4.8 item 19",
            )
        }
        Err(e) => {
            return TestResult::fail(
                test_name,
                "SQLFetch",
                "a SQL_NUMERIC_STRUCT parameter binds and round-trips through SELECT ?",
                e.to_string(),
                Severity::Error,
                Conformance::Level2,
                "spec.md §4.8 item 19",
            )
        }
    }

    let mut roundtripped = NumericStruct {
        precision: 0,
        scale: 0,
        sign: 0,
        val: [0u8; 16],
    };
    let mut out_indicator: sys::SQLLEN = 0;
    let rc = unsafe {
        driver::SQLGetData(
            stmt.handle(),
            1,
            sys::SQL_C_NUMERIC,
            &mut roundtripped as *mut NumericStruct as sys::SQLPOINTER,
            std::mem::size_of::<NumericStruct>() as sys::SQLLEN,
            &mut out_indicator,
        )
    };
    if !sys::sql_succeeded(rc) {
        return TestResult::fail(
            test_name,
            "SQLGetData",
            "a SQL_NUMERIC_STRUCT parameter binds and round-trips through SELECT ?",
            format!("SQLGetData returned {rc}"),
            Severity::Error,
            Conformance::Level2,
            "spec.md §4.8 item 19",
        );
    }

    let matches = roundtripped.precision == original.precision
        && roundtripped.scale == original.scale
        && roundtripped.sign == original.sign
        && roundtripped.val == original.val;

    if matches {
        TestResult::pass(
            test_name,
            "SQLGetData(SQL_C_NUMERIC)",
            "a bound SQL_NUMERIC_STRUCT's precision, scale, sign, and magnitude come back unchanged",
            "round trip matched",
            Conformance::Level2,
            "spec.md §4.8 item 19",
        )
    } else {
        TestResult::fail(
            test_name,
            "SQLGetData(SQL_C_NUMERIC)",
            "a bound SQL_NUMERIC_STRUCT's precision, scale, sign, and magnitude come back unchanged",
            "round-tripped value differs from the original",
            Severity::Error,
            Conformance::Level2,
            "spec.md §4.8 item 19",
        )
    }
}
