// SPDX-License-Identifier: MIT

//! Category 22: descriptor handles (spec §4.8 item 22).

use crate::handles::{Descriptor, DescriptorRole, Statement};
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};
use crate::sys;

pub struct DescriptorCategory;

impl Category for DescriptorCategory {
    fn name(&self) -> &'static str {
        "Descriptor Handles"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("application-descriptor-allocates-and-frees", application_descriptor_allocates_and_frees),
            Probe::new("descriptor-field-access-round-trips", descriptor_field_access_round_trips),
            Probe::new("swap-application-descriptor-onto-statement", swap_application_descriptor_onto_statement),
        ]
    }
}

fn application_descriptor_allocates_and_frees(ctx: &ProbeContext) -> TestResult {
    match Descriptor::new(ctx.conn, DescriptorRole::ApplicationParam) {
        Ok(desc) => {
            if desc.handle().is_null() {
                TestResult::fail(
                    "application-descriptor-allocates-and-frees",
                    "SQLAllocHandle(SQL_HANDLE_DESC)",
                    "an explicitly allocated application-parameter descriptor yields a non-null handle",
                    "handle was null",
                    Severity::Error,
                    Conformance::Level1,
                    "spec.md §4.8 item 22",
                )
            } else {
                TestResult::pass(
                    "application-descriptor-allocates-and-frees",
                    "SQLAllocHandle(SQL_HANDLE_DESC)",
                    "an explicitly allocated application-parameter descriptor yields a non-null handle",
                    "handle allocated",
                    Conformance::Level1,
                    "spec.md §4.8 item 22",
                )
            }
        }
        Err(e) => TestResult::fail(
            "application-descriptor-allocates-and-frees",
            "SQLAllocHandle(SQL_HANDLE_DESC)",
            "an explicitly allocated application-parameter descriptor yields a non-null handle",
            e.to_string(),
            Severity::Error,
            Conformance::Level1,
            "spec.md §4.8 item 22",
        ),
    }
}

fn descriptor_field_access_round_trips(ctx: &ProbeContext) -> TestResult {
    let test_name = "descriptor-field-access-round-trips";
    let function = "SQLSetDescField/SQLGetDescField/SQLCopyDesc";
    let expected = "SQL_DESC_TYPE set on a descriptor reads back unchanged, and SQLCopyDesc propagates it onto a second descriptor";

    let source = match Descriptor::new(ctx.conn, DescriptorRole::ApplicationParam) {
        Ok(d) => d,
        Err(e) => {
            return TestResult::skip_inconclusive(
                test_name,
                "SQLAllocHandle(SQL_HANDLE_DESC)",
                "a descriptor handle allocates",
                e.to_string(),
                Conformance::Level1,
                "spec.md §4.8 item 22",
            )
        }
    };

    if let Err(e) = source.set_type_field(sys::SQL_INTEGER) {
        return TestResult::fail(test_name, function, expected, e.to_string(), Severity::Warning, Conformance::Level1, "spec.md §4.8 item 22");
    }
    match source.type_field() {
        Ok(t) if t == sys::SQL_INTEGER => {}
        Ok(t) => {
            return TestResult::fail(
                test_name,
                function,
                expected,
                format!("read back type {t} instead of SQL_INTEGER"),
                Severity::Warning,
                Conformance::Level1,
                "spec.md §4.8 item 22",
            )
        }
        Err(e) => return TestResult::fail(test_name, function, expected, e.to_string(), Severity::Warning, Conformance::Level1, "spec.md §4.8 item 22"),
    }

    let target = match Descriptor::new(ctx.conn, DescriptorRole::ApplicationParam) {
        Ok(d) => d,
        Err(e) => {
            return TestResult::skip_inconclusive(
                test_name,
                "SQLAllocHandle(SQL_HANDLE_DESC)",
                "a second descriptor handle allocates",
                e.to_string(),
                Conformance::Level1,
                "spec.md §4.8 item 22",
            )
        }
    };

    if let Err(e) = target.copy_from(&source) {
        return TestResult::fail(test_name, function, expected, e.to_string(), Severity::Warning, Conformance::Level1, "spec.md §4.8 item 22");
    }

    match target.type_field() {
        Ok(t) if t == sys::SQL_INTEGER => TestResult::pass(
            test_name,
            function,
            expected,
            "copied descriptor's SQL_DESC_TYPE matched the source",
            Conformance::Level1,
            "spec.md §4.8 item 22",
        ),
        Ok(t) => TestResult::fail(
            test_name,
            function,
            expected,
            format!("copied descriptor reported type {t} instead of SQL_INTEGER"),
            Severity::Warning,
            Conformance::Level1,
            "spec.md §4.8 item 22",
        ),
        Err(e) => TestResult::fail(test_name, function, expected, e.to_string(), Severity::Warning, Conformance::Level1, "spec.md §4.8 item 22"),
    }
}

/// The mock's `SQL_ATTR_APP_PARAM_DESC` handler accepts the bind without
/// tracking which handle was bound, so this only confirms the bind call
/// itself succeeds, not that it changes subsequent statement behavior.
fn swap_application_descriptor_onto_statement(ctx: &ProbeContext) -> TestResult {
    let test_name = "swap-application-descriptor-onto-statement";
    let function = "SQLSetStmtAttr(SQL_ATTR_APP_PARAM_DESC)";
    let expected = "an explicitly allocated application descriptor can be bound onto a statement in place of its implicit one";

    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                test_name,
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Level1,
                "spec.md §4.8 item 22",
            )
        }
    };
    let desc = match Descriptor::new(ctx.conn, DescriptorRole::ApplicationParam) {
        Ok(d) => d,
        Err(e) => {
            return TestResult::skip_inconclusive(
                test_name,
                "SQLAllocHandle(SQL_HANDLE_DESC)",
                "a descriptor handle allocates",
                e.to_string(),
                Conformance::Level1,
                "spec.md §4.8 item 22",
            )
        }
    };

    match stmt.set_app_param_desc(&desc) {
        Ok(()) => TestResult::pass(test_name, function, expected, "bind accepted", Conformance::Level1, "spec.md §4.8 item 22"),
        Err(e) => TestResult::fail(test_name, function, expected, e.to_string(), Severity::Warning, Conformance::Level1, "spec.md §4.8 item 22"),
    }
}
