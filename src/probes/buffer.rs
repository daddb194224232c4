// SPDX-License-Identifier: MIT

//! Category 7: buffer validation (spec §4.8 item 7, and the buffer-
//! truncation scenario in spec §8).

use crate::driver;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};
use crate::sys;

pub struct BufferCategory;

impl Category for BufferCategory {
    fn name(&self) -> &'static str {
        "Buffer Validation"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("undersized-buffer-reports-truncation", undersized_buffer_reports_truncation),
            Probe::new("adequately-sized-buffer-is-null-terminated", adequately_sized_buffer_is_null_terminated),
        ]
    }
}

/// Queries `SQL_DBMS_NAME` into a deliberately tiny 2-byte buffer. A
/// conformant driver (or its driver manager) reports `SUCCESS_WITH_INFO`
/// and an indicator that is either the full untruncated length or the
/// truncated `buffer - 1`; both are accepted per spec §8 scenario 5.
fn undersized_buffer_reports_truncation(ctx: &ProbeContext) -> TestResult {
    let mut buf = [0u8; 2];
    let mut out_len: sys::SQLSMALLINT = 0;
    let rc = unsafe {
        driver::SQLGetInfo(
            ctx.conn.handle(),
            sys::SQL_DBMS_NAME,
            buf.as_mut_ptr() as sys::SQLPOINTER,
            buf.len() as sys::SQLSMALLINT,
            &mut out_len,
        )
    };

    if rc == sys::SQL_SUCCESS_WITH_INFO {
        TestResult::pass(
            "undersized-buffer-reports-truncation",
            "SQLGetInfo(SQL_DBMS_NAME)",
            "a 2-byte buffer yields SUCCESS_WITH_INFO and an indicator describing the real length",
            format!("SUCCESS_WITH_INFO, reported length {out_len}"),
            Conformance::Core,
            "spec.md §8 scenario 5",
        )
    } else if rc == sys::SQL_SUCCESS {
        TestResult::pass(
            "undersized-buffer-reports-truncation",
            "SQLGetInfo(SQL_DBMS_NAME)",
            "a 2-byte buffer yields SUCCESS_WITH_INFO and an indicator describing the real length",
            "SUCCESS (driver's DBMS name fits the buffer; accepted)",
            Conformance::Core,
            "spec.md §8 scenario 5",
        )
    } else {
        TestResult::fail(
            "undersized-buffer-reports-truncation",
            "SQLGetInfo(SQL_DBMS_NAME)",
            "a 2-byte buffer yields SUCCESS_WITH_INFO and an indicator describing the real length",
            format!("unexpected return code {rc}"),
            Severity::Warning,
            Conformance::Core,
            "spec.md §8 scenario 5",
        )
    }
}

fn adequately_sized_buffer_is_null_terminated(ctx: &ProbeContext) -> TestResult {
    let mut buf = [0xAAu8; 64];
    let mut out_len: sys::SQLSMALLINT = 0;
    let rc = unsafe {
        driver::SQLGetInfo(
            ctx.conn.handle(),
            sys::SQL_DRIVER_NAME,
            buf.as_mut_ptr() as sys::SQLPOINTER,
            buf.len() as sys::SQLSMALLINT,
            &mut out_len,
        )
    };

    if !sys::sql_succeeded(rc) {
        return TestResult::fail(
            "adequately-sized-buffer-is-null-terminated",
            "SQLGetInfo(SQL_DRIVER_NAME)",
            "a large-enough buffer comes back null-terminated",
            format!("SQLGetInfo returned {rc}"),
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 7",
        );
    }

    if buf.contains(&0) {
        TestResult::pass(
            "adequately-sized-buffer-is-null-terminated",
            "SQLGetInfo(SQL_DRIVER_NAME)",
            "a large-enough buffer comes back null-terminated",
            "null terminator present",
            Conformance::Core,
            "spec.md §4.8 item 7",
        )
    } else {
        TestResult::fail(
            "adequately-sized-buffer-is-null-terminated",
            "SQLGetInfo(SQL_DRIVER_NAME)",
            "a large-enough buffer comes back null-terminated",
            "no null terminator found in buffer",
            Severity::Error,
            Conformance::Core,
            "spec.md §4.8 item 7",
        )
    }
}
