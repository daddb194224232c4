// SPDX-License-Identifier: MIT

//! Category 1: connection behaviors (spec §4.8 item 1).

use crate::handles::Connection;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};

pub struct ConnectionCategory;

impl Category for ConnectionCategory {
    fn name(&self) -> &'static str {
        "Connection"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("connection-reports-driver-identity", connection_reports_driver_identity),
            Probe::new("double-connect-is-rejected", double_connect_is_rejected),
            Probe::new("autocommit-defaults-to-on", autocommit_defaults_to_on),
        ]
    }
}

fn connection_reports_driver_identity(ctx: &ProbeContext) -> TestResult {
    match ctx.capabilities.driver_name.as_deref() {
        Some(name) if !name.is_empty() => TestResult::pass(
            "connection-reports-driver-identity",
            "SQLGetInfo(SQL_DRIVER_NAME)",
            "a non-empty driver name",
            name,
            Conformance::Core,
            "spec.md §4.2",
        ),
        _ => TestResult::fail(
            "connection-reports-driver-identity",
            "SQLGetInfo(SQL_DRIVER_NAME)",
            "a non-empty driver name",
            "driver name absent or empty",
            Severity::Warning,
            Conformance::Core,
            "spec.md §4.2",
        ),
    }
}

fn double_connect_is_rejected(ctx: &ProbeContext) -> TestResult {
    let env = ctx.conn.environment();
    let mut second = match Connection::new(env) {
        Ok(c) => c,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "double-connect-is-rejected",
                "SQLAllocHandle(SQL_HANDLE_DBC)",
                "a second connection handle allocates cleanly",
                e.to_string(),
                Conformance::Core,
                "spec.md §4.2",
            )
        }
    };

    if let Err(e) = second.connect(ctx.connection_string) {
        return TestResult::skip_inconclusive(
            "double-connect-is-rejected",
            "SQLDriverConnect",
            "the first connect on a fresh handle succeeds",
            e.to_string(),
            Conformance::Core,
            "spec.md §4.2",
        );
    }

    match second.connect(ctx.connection_string) {
        Err(crate::error::OdbcError::AlreadyConnected) => TestResult::pass(
            "double-connect-is-rejected",
            "SQLDriverConnect",
            "a second connect on an already-connected handle is rejected",
            "rejected with AlreadyConnected",
            Conformance::Core,
            "spec.md §4.2",
        ),
        Err(e) => TestResult::fail(
            "double-connect-is-rejected",
            "SQLDriverConnect",
            "a second connect on an already-connected handle is rejected",
            format!("rejected, but with an unexpected error: {e}"),
            Severity::Warning,
            Conformance::Core,
            "spec.md §4.2",
        ),
        Ok(()) => TestResult::fail(
            "double-connect-is-rejected",
            "SQLDriverConnect",
            "a second connect on an already-connected handle is rejected",
            "second connect succeeded silently",
            Severity::Error,
            Conformance::Core,
            "spec.md §4.2",
        ),
    }
}

fn autocommit_defaults_to_on(ctx: &ProbeContext) -> TestResult {
    match ctx.conn.autocommit() {
        Ok(true) => TestResult::pass(
            "autocommit-defaults-to-on",
            "SQLGetConnectAttr(SQL_ATTR_AUTOCOMMIT)",
            "autocommit is on immediately after connect",
            "on",
            Conformance::Core,
            "spec.md §4.2",
        ),
        Ok(false) => TestResult::fail(
            "autocommit-defaults-to-on",
            "SQLGetConnectAttr(SQL_ATTR_AUTOCOMMIT)",
            "autocommit is on immediately after connect",
            "off",
            Severity::Warning,
            Conformance::Core,
            "spec.md §4.2",
        ),
        Err(e) => TestResult::skip_inconclusive(
            "autocommit-defaults-to-on",
            "SQLGetConnectAttr(SQL_ATTR_AUTOCOMMIT)",
            "autocommit state is queryable",
            e.to_string(),
            Conformance::Core,
            "spec.md §4.2",
        ),
    }
}

#[cfg(all(test, feature = "mock-driver"))]
mod tests {
    use super::*;
    use crate::capability::CapabilitySnapshot;
    use crate::handles::Environment;
    use crate::harness::TestStatus;
    use crate::mock;

    #[test]
    fn double_connect_probe_passes_against_the_mock() {
        mock::reset();
        let env = Environment::new().unwrap();
        let mut conn = Connection::new(&env).unwrap();
        let cs = "Driver={Mock ODBC Driver};Mode=Success;";
        conn.connect(cs).unwrap();
        let caps = CapabilitySnapshot::default();
        let ctx = ProbeContext { conn: &conn, capabilities: &caps, connection_string: cs };

        let result = double_connect_is_rejected(&ctx);
        assert_eq!(result.status, TestStatus::Pass);
    }
}
