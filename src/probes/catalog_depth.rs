// SPDX-License-Identifier: MIT

//! Category 11: catalog depth (spec §4.8 item 11).

use crate::driver;
use crate::handles::Statement;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};
use crate::sys;
use crate::vocabulary::with_temp_table;

pub struct CatalogDepthCategory;

impl Category for CatalogDepthCategory {
    fn name(&self) -> &'static str {
        "Catalog Depth"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("sqltables-search-pattern-narrows-results", sqltables_search_pattern_narrows_results),
            Probe::new("result-set-column-count-is-stable", result_set_column_count_is_stable),
        ]
    }
}

fn sqltables_search_pattern_narrows_results(ctx: &ProbeContext) -> TestResult {
    let outcome = with_temp_table(ctx.conn, "catalog_depth", |_stmt, table_name| {
        let miss_stmt = Statement::new(ctx.conn)?;
        let missing = b"a_table_name_that_should_never_exist";
        let rc = unsafe {
            driver::SQLTables(
                miss_stmt.handle(),
                std::ptr::null(),
                0,
                std::ptr::null(),
                0,
                missing.as_ptr(),
                missing.len() as sys::SQLSMALLINT,
                std::ptr::null(),
                0,
            )
        };
        crate::error::check_result(rc, sys::SQL_HANDLE_STMT, miss_stmt.handle(), "SQLTables")?;
        let saw_unrelated_row = matches!(miss_stmt.fetch(), Ok(true));
        let _ = table_name;
        Ok(saw_unrelated_row)
    });

    match outcome {
        Ok(false) => TestResult::pass(
            "sqltables-search-pattern-narrows-results",
            "SQLTables",
            "a table-name pattern that matches nothing returns no rows",
            "no rows returned",
            Conformance::Core,
            "spec.md §4.8 item 11",
        ),
        Ok(true) => TestResult::fail(
            "sqltables-search-pattern-narrows-results",
            "SQLTables",
            "a table-name pattern that matches nothing returns no rows",
            "a row was returned for a non-matching pattern",
            Severity::Warning,
            Conformance::Core,
            "spec.md §4.8 item 11",
        ),
        Err(e) => TestResult::skip_inconclusive(
            "sqltables-search-pattern-narrows-results",
            "SQLTables",
            "a temp table exists so the pattern-search probe has a baseline to narrow against",
            e.to_string(),
            Conformance::Core,
            "spec.md §4.8 item 11",
        ),
    }
}

fn result_set_column_count_is_stable(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "result-set-column-count-is-stable",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.8 item 11",
            )
        }
    };

    if let Err(e) = stmt.execute("SELECT 1") {
        return TestResult::fail(
            "result-set-column-count-is-stable",
            "SQLExecDirect",
            "SQLNumResultCols matches the column count of SELECT 1",
            e.to_string(),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 11",
        );
    }

    match stmt.num_result_cols() {
        Ok(1) => TestResult::pass(
            "result-set-column-count-is-stable",
            "SQLNumResultCols",
            "SQLNumResultCols matches the column count of SELECT 1",
            "1",
            Conformance::Core,
            "spec.md §4.8 item 11",
        ),
        Ok(n) => TestResult::fail(
            "result-set-column-count-is-stable",
            "SQLNumResultCols",
            "SQLNumResultCols matches the column count of SELECT 1",
            n.to_string(),
            Severity::Warning,
            Conformance::Core,
            "spec.md §4.8 item 11",
        ),
        Err(e) => TestResult::fail(
            "result-set-column-count-is-stable",
            "SQLNumResultCols",
            "SQLNumResultCols matches the column count of SELECT 1",
            e.to_string(),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 11",
        ),
    }
}
