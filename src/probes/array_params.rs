// SPDX-License-Identifier: MIT

//! Category 18: array parameter binding (spec §4.8 item 18, and the
//! temp-schema reuse scenario in spec §8 scenario 6).
//!
//! `array_binding_reports_params_processed` drives the row-wise-count
//! path end to end: `SQL_ATTR_PARAMSET_SIZE` sets the parameter-set size
//! and `SQL_ATTR_PARAMS_PROCESSED_PTR` binds the out-parameter the driver
//! writes the processed-row count into after execution.

use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};
use crate::sys;
use crate::vocabulary::with_temp_table;

pub struct ArrayParamsCategory;

impl Category for ArrayParamsCategory {
    fn name(&self) -> &'static str {
        "Array Parameter Binding"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("temp-table-accepts-repeated-single-row-inserts", temp_table_accepts_repeated_single_row_inserts),
            Probe::new("array-binding-reports-params-processed", array_binding_reports_params_processed),
        ]
    }
}

fn temp_table_accepts_repeated_single_row_inserts(ctx: &ProbeContext) -> TestResult {
    let outcome = with_temp_table(ctx.conn, "array_params", |stmt, table_name| {
        for _ in 0..3 {
            stmt.execute(&format!("INSERT INTO {table_name} VALUES (1)"))?;
            if stmt.row_count()? != 1 {
                return Ok(false);
            }
        }
        Ok(true)
    });

    match outcome {
        Ok(true) => TestResult::pass(
            "temp-table-accepts-repeated-single-row-inserts",
            "SQLExecDirect/SQLRowCount",
            "three successive size-one inserts each report a row count of 1, in lieu of a true array insert",
            "all three inserts reported row count 1",
            Conformance::Level2,
            "spec.md §8 scenario 6",
        ),
        Ok(false) => TestResult::fail(
            "temp-table-accepts-repeated-single-row-inserts",
            "SQLExecDirect/SQLRowCount",
            "three successive size-one inserts each report a row count of 1, in lieu of a true array insert",
            "a row count other than 1 was reported",
            Severity::Warning,
            Conformance::Level2,
            "spec.md §8 scenario 6",
        ),
        Err(e) => TestResult::fail(
            "temp-table-accepts-repeated-single-row-inserts",
            "SQLExecDirect/SQLRowCount",
            "three successive size-one inserts each report a row count of 1, in lieu of a true array insert",
            e.to_string(),
            Severity::Error,
            Conformance::Level2,
            "spec.md §8 scenario 6",
        ),
    }
}

fn array_binding_reports_params_processed(ctx: &ProbeContext) -> TestResult {
    let test_name = "array-binding-reports-params-processed";
    const PARAMSET_SIZE: usize = 3;
    let outcome = with_temp_table(ctx.conn, "array_params_count", |stmt, table_name| {
        stmt.set_paramset_size(PARAMSET_SIZE)?;
        let mut processed: sys::SQLULEN = 0;
        stmt.set_params_processed_ptr(&mut processed)?;
        stmt.execute(&format!("INSERT INTO {table_name} VALUES (1)"))?;
        Ok(processed as usize)
    });

    match outcome {
        Ok(PARAMSET_SIZE) => TestResult::pass(
            test_name,
            "SQLSetStmtAttr(SQL_ATTR_PARAMSET_SIZE/SQL_ATTR_PARAMS_PROCESSED_PTR)",
            "the processed-row count matches the bound parameter-set size after execution",
            PARAMSET_SIZE.to_string(),
            Conformance::Level2,
            "spec.md §4.8 item 18",
        ),
        Ok(other) => TestResult::fail(
            test_name,
            "SQLSetStmtAttr(SQL_ATTR_PARAMSET_SIZE/SQL_ATTR_PARAMS_PROCESSED_PTR)",
            "the processed-row count matches the bound parameter-set size after execution",
            format!("expected {PARAMSET_SIZE}, got {other}"),
            Severity::Warning,
            Conformance::Level2,
            "spec.md §4.8 item 18",
        ),
        Err(e) => TestResult::fail(
            test_name,
            "SQLSetStmtAttr(SQL_ATTR_PARAMSET_SIZE/SQL_ATTR_PARAMS_PROCESSED_PTR)",
            "the processed-row count matches the bound parameter-set size after execution",
            e.to_string(),
            Severity::Error,
            Conformance::Level2,
            "spec.md §4.8 item 18",
        ),
    }
}
