// SPDX-License-Identifier: MIT

//! Category 3: metadata/catalog (spec §4.8 item 3). `SQLTables` is
//! checked directly; `SQLColumns`/`SQLPrimaryKeys`/`SQLStatistics`/
//! `SQLSpecialColumns` are checked together against the same scratch
//! table, each confirming it returns at least one row for the table's
//! sole `id` column.

use crate::driver;
use crate::handles::Statement;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};
use crate::sys;
use crate::vocabulary::with_temp_table;

pub struct CatalogCategory;

impl Category for CatalogCategory {
    fn name(&self) -> &'static str {
        "Metadata/Catalog"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("sqltables-sees-a-created-table", sqltables_sees_a_created_table),
            Probe::new("catalog-functions-see-a-created-tables-column", catalog_functions_see_a_created_tables_column),
        ]
    }
}

fn sqltables_sees_a_created_table(ctx: &ProbeContext) -> TestResult {
    let outcome = with_temp_table(ctx.conn, "catalog_probe", |_stmt, table_name| {
        let listing_stmt = Statement::new(ctx.conn)?;
        let name_bytes = table_name.as_bytes();
        let rc = unsafe {
            driver::SQLTables(
                listing_stmt.handle(),
                std::ptr::null(),
                0,
                std::ptr::null(),
                0,
                name_bytes.as_ptr(),
                name_bytes.len() as sys::SQLSMALLINT,
                std::ptr::null(),
                0,
            )
        };
        crate::error::check_result(rc, sys::SQL_HANDLE_STMT, listing_stmt.handle(), "SQLTables")?;
        let found = matches!(listing_stmt.fetch(), Ok(true));
        Ok(found)
    });

    match outcome {
        Ok(true) => TestResult::pass(
            "sqltables-sees-a-created-table",
            "SQLTables",
            "SQLTables returns a row for a table just created",
            "row found",
            Conformance::Core,
            "spec.md §4.8 item 3",
        ),
        Ok(false) => TestResult::fail(
            "sqltables-sees-a-created-table",
            "SQLTables",
            "SQLTables returns a row for a table just created",
            "no matching row",
            Severity::Warning,
            Conformance::Core,
            "spec.md §4.8 item 3",
        ),
        Err(e) => TestResult::skip_inconclusive(
            "sqltables-sees-a-created-table",
            "SQLTables",
            "a temp table can be created and listed",
            e.to_string(),
            Conformance::Core,
            "spec.md §4.8 item 3",
        ),
    }
}

fn catalog_functions_see_a_created_tables_column(ctx: &ProbeContext) -> TestResult {
    let test_name = "catalog-functions-see-a-created-tables-column";
    let outcome = with_temp_table(ctx.conn, "catalog_fn_probe", |_stmt, table_name| {
        let name_bytes = table_name.as_bytes();

        let columns_stmt = Statement::new(ctx.conn)?;
        let rc = unsafe {
            driver::SQLColumns(
                columns_stmt.handle(),
                std::ptr::null(),
                0,
                std::ptr::null(),
                0,
                name_bytes.as_ptr(),
                name_bytes.len() as sys::SQLSMALLINT,
                std::ptr::null(),
                0,
            )
        };
        crate::error::check_result(rc, sys::SQL_HANDLE_STMT, columns_stmt.handle(), "SQLColumns")?;
        let columns_found = matches!(columns_stmt.fetch(), Ok(true));

        let pk_stmt = Statement::new(ctx.conn)?;
        let rc = unsafe {
            driver::SQLPrimaryKeys(
                pk_stmt.handle(),
                std::ptr::null(),
                0,
                std::ptr::null(),
                0,
                name_bytes.as_ptr(),
                name_bytes.len() as sys::SQLSMALLINT,
            )
        };
        crate::error::check_result(rc, sys::SQL_HANDLE_STMT, pk_stmt.handle(), "SQLPrimaryKeys")?;
        let pk_found = matches!(pk_stmt.fetch(), Ok(true));

        let stats_stmt = Statement::new(ctx.conn)?;
        let rc = unsafe {
            driver::SQLStatistics(
                stats_stmt.handle(),
                std::ptr::null(),
                0,
                std::ptr::null(),
                0,
                name_bytes.as_ptr(),
                name_bytes.len() as sys::SQLSMALLINT,
                sys::SQL_INDEX_ALL,
                sys::SQL_QUICK,
            )
        };
        crate::error::check_result(rc, sys::SQL_HANDLE_STMT, stats_stmt.handle(), "SQLStatistics")?;
        let stats_found = matches!(stats_stmt.fetch(), Ok(true));

        let special_stmt = Statement::new(ctx.conn)?;
        let rc = unsafe {
            driver::SQLSpecialColumns(
                special_stmt.handle(),
                sys::SQL_BEST_ROWID,
                std::ptr::null(),
                0,
                std::ptr::null(),
                0,
                name_bytes.as_ptr(),
                name_bytes.len() as sys::SQLSMALLINT,
                sys::SQL_SCOPE_CURROW,
                sys::SQL_NO_NULLS,
            )
        };
        crate::error::check_result(rc, sys::SQL_HANDLE_STMT, special_stmt.handle(), "SQLSpecialColumns")?;
        let special_found = matches!(special_stmt.fetch(), Ok(true));

        Ok(columns_found && pk_found && stats_found && special_found)
    });

    match outcome {
        Ok(true) => TestResult::pass(
            test_name,
            "SQLColumns/SQLPrimaryKeys/SQLStatistics/SQLSpecialColumns",
            "every catalog function returns at least one row for the scratch table",
            "all four returned a row",
            Conformance::Level1,
            "spec.md §4.8 item 3",
        ),
        Ok(false) => TestResult::fail(
            test_name,
            "SQLColumns/SQLPrimaryKeys/SQLStatistics/SQLSpecialColumns",
            "every catalog function returns at least one row for the scratch table",
            "at least one catalog function returned no row",
            Severity::Warning,
            Conformance::Level1,
            "spec.md §4.8 item 3",
        ),
        Err(e) => TestResult::skip_inconclusive(
            test_name,
            "SQLColumns/SQLPrimaryKeys/SQLStatistics/SQLSpecialColumns",
            "a temp table's columns, primary key, statistics, and special columns can all be listed",
            e.to_string(),
            Conformance::Level1,
            "spec.md §4.8 item 3",
        ),
    }
}
