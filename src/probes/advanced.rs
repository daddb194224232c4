// SPDX-License-Identifier: MIT

//! Category 6: advanced features (spec §4.8 item 6). Array-parameter
//! binding and scrollable-cursor support are both Level 2 statement
//! attributes; a driver that rejects them with `HY092` (invalid
//! attribute/option identifier) is reported as `skip-unsupported` rather
//! than failed (spec §8 scenario 2's capability-gated skip law).

use crate::handles::Statement;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};
use crate::sys;

pub struct AdvancedCategory;

impl Category for AdvancedCategory {
    fn name(&self) -> &'static str {
        "Advanced Features"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("array-binding-parameter-set-size-ten", array_binding_parameter_set_size_ten),
            Probe::new("scrollable-cursor-attribute-round-trips", scrollable_cursor_attribute_round_trips),
        ]
    }
}

fn array_binding_parameter_set_size_ten(ctx: &ProbeContext) -> TestResult {
    let test_name = "array-binding-parameter-set-size-ten";
    let function = "SQLSetStmtAttr(SQL_ATTR_PARAMSET_SIZE)";
    let expected = "binding a parameter set of size 10 succeeds";

    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                test_name,
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Level2,
                "spec.md §4.8 item 6",
            )
        }
    };

    match stmt.set_paramset_size(10) {
        Ok(()) => TestResult::pass(
            test_name,
            function,
            expected,
            "accepted",
            Conformance::Level2,
            "spec.md §4.8 item 6",
        ),
        Err(e) if e.primary_sqlstate() == Some("HY092") => {
            TestResult::skip_unsupported(test_name, function, expected, e.to_string(), Conformance::Level2, "spec.md §4.8 item 6")
                .with_suggestion("driver does not advertise array-parameter attribute support; this is a Level 2 feature")
        }
        Err(e) => TestResult::fail(
            test_name,
            function,
            expected,
            e.to_string(),
            Severity::Error,
            Conformance::Level2,
            "spec.md §4.8 item 6",
        ),
    }
}

/// Distinct from `cursor::cursor_type_attribute_round_trips`: this checks
/// the attribute's documented default (`SQL_CURSOR_FORWARD_ONLY`) before
/// any explicit set, then confirms a fresh statement can still be
/// upgraded to a scrollable type.
fn scrollable_cursor_attribute_round_trips(ctx: &ProbeContext) -> TestResult {
    let test_name = "scrollable-cursor-attribute-round-trips";
    let function = "SQLGetStmtAttr/SQLSetStmtAttr(SQL_ATTR_CURSOR_TYPE)";
    let expected = "a fresh statement defaults to SQL_CURSOR_FORWARD_ONLY and can be upgraded to SQL_CURSOR_STATIC";

    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                test_name,
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Level1,
                "spec.md §4.8 item 6",
            )
        }
    };

    let default_type = match stmt.cursor_type() {
        Ok(t) => t,
        Err(e) => {
            return TestResult::fail(
                test_name,
                function,
                expected,
                e.to_string(),
                Severity::Warning,
                Conformance::Level1,
                "spec.md §4.8 item 6",
            )
        }
    };
    if default_type != sys::SQL_CURSOR_FORWARD_ONLY {
        return TestResult::fail(
            test_name,
            function,
            expected,
            format!("default cursor type was {default_type}, not SQL_CURSOR_FORWARD_ONLY"),
            Severity::Warning,
            Conformance::Level1,
            "spec.md §4.8 item 6",
        );
    }

    if let Err(e) = stmt.set_cursor_type(sys::SQL_CURSOR_STATIC) {
        return TestResult::fail(
            test_name,
            function,
            expected,
            e.to_string(),
            Severity::Warning,
            Conformance::Level1,
            "spec.md §4.8 item 6",
        );
    }

    match stmt.cursor_type() {
        Ok(t) if t == sys::SQL_CURSOR_STATIC => TestResult::pass(
            test_name,
            function,
            expected,
            "defaulted to SQL_CURSOR_FORWARD_ONLY, upgraded to SQL_CURSOR_STATIC",
            Conformance::Level1,
            "spec.md §4.8 item 6",
        ),
        Ok(t) => TestResult::fail(
            test_name,
            function,
            expected,
            format!("read back cursor type {t} after upgrading"),
            Severity::Warning,
            Conformance::Level1,
            "spec.md §4.8 item 6",
        ),
        Err(e) => TestResult::fail(
            test_name,
            function,
            expected,
            e.to_string(),
            Severity::Warning,
            Conformance::Level1,
            "spec.md §4.8 item 6",
        ),
    }
}

#[cfg(all(test, feature = "mock-driver"))]
mod tests {
    use super::*;
    use crate::capability::CapabilitySnapshot;
    use crate::handles::{Connection, Environment};
    use crate::harness::TestStatus;
    use crate::mock;

    #[test]
    fn array_binding_probe_skips_unsupported_with_level_2_hint_on_a_level_1_driver() {
        mock::reset();
        let env = Environment::new().unwrap();
        let mut conn = Connection::new(&env).unwrap();
        let cs = "Driver={Mock ODBC Driver};Mode=NoLevel2;";
        conn.connect(cs).unwrap();
        let caps = CapabilitySnapshot::default();
        let ctx = ProbeContext { conn: &conn, capabilities: &caps, connection_string: cs };

        let result = array_binding_parameter_set_size_ten(&ctx);
        assert_eq!(result.status, TestStatus::SkipUnsupported);
        assert!(result.suggestion.unwrap().contains("Level 2"));
    }

    #[test]
    fn array_binding_probe_passes_on_a_driver_that_supports_it() {
        mock::reset();
        let env = Environment::new().unwrap();
        let mut conn = Connection::new(&env).unwrap();
        let cs = "Driver={Mock ODBC Driver};Mode=Success;";
        conn.connect(cs).unwrap();
        let caps = CapabilitySnapshot::default();
        let ctx = ProbeContext { conn: &conn, capabilities: &caps, connection_string: cs };

        let result = array_binding_parameter_set_size_ten(&ctx);
        assert_eq!(result.status, TestStatus::Pass);
    }
}
