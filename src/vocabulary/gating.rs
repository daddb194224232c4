// SPDX-License-Identifier: MIT

//! Capability-gated skip helper: probes that depend on an optional CLI
//! feature must skip rather than fail when the driver doesn't advertise
//! it (spec §4.8, "capability-gated skip-unsupported").

use crate::capability::CapabilitySnapshot;
use crate::harness::{Conformance, TestResult};

/// Runs `body` only if `predicate` holds against `capabilities`; otherwise
/// produces a `SkipUnsupported` result in its place. `body` still gets to
/// name the probe and cite its own spec reference on the skip path, so the
/// report reads the same whether the probe ran or was gated off.
pub fn run_if_supported(
    capabilities: &CapabilitySnapshot,
    predicate: impl FnOnce(&CapabilitySnapshot) -> bool,
    test_name: &str,
    function: &str,
    conformance: Conformance,
    spec_reference: &str,
    expected: &str,
    body: impl FnOnce() -> TestResult,
) -> TestResult {
    if predicate(capabilities) {
        body()
    } else {
        TestResult::skip_unsupported(
            test_name,
            function,
            expected,
            "driver does not advertise this capability",
            conformance,
            spec_reference,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_capability_produces_skip_not_failure() {
        let caps = CapabilitySnapshot::default();
        let result = run_if_supported(
            &caps,
            |c| c.supports_function("SQLBulkOperations"),
            "bulk-ops",
            "SQLBulkOperations",
            Conformance::Level2,
            "n/a",
            "bulk operations supported",
            || unreachable!("predicate should have failed"),
        );
        assert_eq!(result.status, crate::harness::TestStatus::SkipUnsupported);
    }

    #[test]
    fn supported_capability_runs_the_body() {
        let mut caps = CapabilitySnapshot::default();
        caps.functions.supported.push("SQLBulkOperations".to_string());
        let result = run_if_supported(
            &caps,
            |c| c.supports_function("SQLBulkOperations"),
            "bulk-ops",
            "SQLBulkOperations",
            Conformance::Level2,
            "n/a",
            "bulk operations supported",
            || TestResult::pass("bulk-ops", "SQLBulkOperations", "ok", "ok", Conformance::Level2, "n/a"),
        );
        assert_eq!(result.status, crate::harness::TestStatus::Pass);
    }
}
