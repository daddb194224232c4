// SPDX-License-Identifier: MIT

//! Category 4: data-type retrieval (spec §4.8 item 4).

use crate::driver;
use crate::handles::Statement;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};
use crate::sys;

pub struct DataTypeCategory;

impl Category for DataTypeCategory {
    fn name(&self) -> &'static str {
        "Data-Type Retrieval"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("retrieves-an-integer-column", retrieves_an_integer_column),
            Probe::new("type-catalog-advertises-varchar-and-integer", type_catalog_advertises_common_types),
        ]
    }
}

fn retrieves_an_integer_column(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "retrieves-an-integer-column",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 4",
            )
        }
    };

    if let Err(e) = stmt.execute("SELECT 1") {
        return TestResult::fail(
            "retrieves-an-integer-column",
            "SQLExecDirect",
            "SELECT 1 retrieves the integer value 1",
            e.to_string(),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 4",
        );
    }

    if !matches!(stmt.fetch(), Ok(true)) {
        return TestResult::fail(
            "retrieves-an-integer-column",
            "SQLFetch",
            "SELECT 1 retrieves the integer value 1",
            "no row returned",
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 4",
        );
    }

    let mut value: i32 = 0;
    let mut indicator: sys::SQLLEN = 0;
    let rc = unsafe {
        driver::SQLGetData(
            stmt.handle(),
            1,
            sys::SQL_C_SLONG,
            &mut value as *mut i32 as sys::SQLPOINTER,
            0,
            &mut indicator,
        )
    };

    if !sys::sql_succeeded(rc) {
        return TestResult::fail(
            "retrieves-an-integer-column",
            "SQLGetData",
            "SELECT 1 retrieves the integer value 1",
            format!("SQLGetData returned {rc}"),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 4",
        );
    }

    if value == 1 {
        TestResult::pass(
            "retrieves-an-integer-column",
            "SQLGetData",
            "SELECT 1 retrieves the integer value 1",
            value.to_string(),
            Conformance::Core,
            "spec.md §4.8 item 4",
        )
    } else {
        TestResult::fail(
            "retrieves-an-integer-column",
            "SQLGetData",
            "SELECT 1 retrieves the integer value 1",
            value.to_string(),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 4",
        )
    }
}

fn type_catalog_advertises_common_types(ctx: &ProbeContext) -> TestResult {
    let has_integer = ctx.capabilities.has_sql_type(4);
    let has_varchar = ctx.capabilities.has_sql_type(12);

    if has_integer && has_varchar {
        TestResult::pass(
            "type-catalog-advertises-varchar-and-integer",
            "SQLGetTypeInfo",
            "the type catalog includes at least INTEGER and VARCHAR",
            "both present",
            Conformance::Core,
            "spec.md §4.6",
        )
    } else {
        TestResult::fail(
            "type-catalog-advertises-varchar-and-integer",
            "SQLGetTypeInfo",
            "the type catalog includes at least INTEGER and VARCHAR",
            format!("integer present: {has_integer}, varchar present: {has_varchar}"),
            Severity::Warning,
            Conformance::Core,
            "spec.md §4.6",
        )
    }
}
