// SPDX-License-Identifier: MIT

//! The harness's central product: [`TestResult`] and its graded outcomes.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestStatus {
    Pass,
    Fail,
    #[serde(rename = "SKIP_UNSUPPORTED")]
    SkipUnsupported,
    #[serde(rename = "SKIP_INCONCLUSIVE")]
    SkipInconclusive,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Conformance {
    Core,
    #[serde(rename = "Level 1")]
    Level1,
    #[serde(rename = "Level 2")]
    Level2,
}

/// One probe's outcome. Every field named in spec.md §3's data model is
/// represented here.
#[derive(Debug, Clone, Serialize)]
pub struct TestResult {
    pub test_name: String,
    pub function: String,
    pub status: TestStatus,
    pub severity: Severity,
    pub conformance: Conformance,
    pub spec_reference: String,
    pub expected: String,
    pub actual: String,
    pub diagnostic: Option<String>,
    pub suggestion: Option<String>,
    /// Microseconds elapsed around the probe body, excluding sink work.
    pub duration_us: u64,
}

impl TestResult {
    /// The result builder from spec §4.8: produces a `TestResult` with
    /// defaulted `diagnostic`/`suggestion`/`duration_us`, which the probe
    /// then mutates incrementally as it proceeds.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        test_name: impl Into<String>,
        function: impl Into<String>,
        status: TestStatus,
        expected: impl Into<String>,
        actual: impl Into<String>,
        severity: Severity,
        conformance: Conformance,
        spec_reference: impl Into<String>,
    ) -> Self {
        TestResult {
            test_name: test_name.into(),
            function: function.into(),
            status,
            severity,
            conformance,
            spec_reference: spec_reference.into(),
            expected: expected.into(),
            actual: actual.into(),
            diagnostic: None,
            suggestion: None,
            duration_us: 0,
        }
    }

    pub fn pass(
        test_name: impl Into<String>,
        function: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        conformance: Conformance,
        spec_reference: impl Into<String>,
    ) -> Self {
        Self::new(
            test_name,
            function,
            TestStatus::Pass,
            expected,
            actual,
            Severity::Info,
            conformance,
            spec_reference,
        )
    }

    pub fn fail(
        test_name: impl Into<String>,
        function: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        severity: Severity,
        conformance: Conformance,
        spec_reference: impl Into<String>,
    ) -> Self {
        Self::new(
            test_name,
            function,
            TestStatus::Fail,
            expected,
            actual,
            severity,
            conformance,
            spec_reference,
        )
    }

    pub fn skip_unsupported(
        test_name: impl Into<String>,
        function: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        conformance: Conformance,
        spec_reference: impl Into<String>,
    ) -> Self {
        Self::new(
            test_name,
            function,
            TestStatus::SkipUnsupported,
            expected,
            actual,
            Severity::Info,
            conformance,
            spec_reference,
        )
    }

    pub fn skip_inconclusive(
        test_name: impl Into<String>,
        function: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        conformance: Conformance,
        spec_reference: impl Into<String>,
    ) -> Self {
        Self::new(
            test_name,
            function,
            TestStatus::SkipInconclusive,
            expected,
            actual,
            Severity::Warning,
            conformance,
            spec_reference,
        )
    }

    pub fn with_diagnostic(mut self, diagnostic: impl Into<String>) -> Self {
        self.diagnostic = Some(diagnostic.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Invariant check used by the harness and by tests: non-pass results
    /// must carry at least one of actual/diagnostic/suggestion non-empty.
    pub fn has_non_empty_diagnosis(&self) -> bool {
        if self.status == TestStatus::Pass {
            return true;
        }
        !self.actual.is_empty()
            || self.diagnostic.as_deref().is_some_and(|s| !s.is_empty())
            || self.suggestion.as_deref().is_some_and(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_result_satisfies_diagnosis_invariant() {
        let r = TestResult::pass("t1", "SQLConnect", "connects", "connected", Conformance::Core, "§4.2");
        assert!(r.has_non_empty_diagnosis());
    }

    #[test]
    fn fail_without_actual_or_diagnostic_violates_invariant() {
        let r = TestResult::new(
            "t1",
            "SQLConnect",
            TestStatus::Fail,
            "connects",
            "",
            Severity::Error,
            Conformance::Core,
            "§4.2",
        );
        assert!(!r.has_non_empty_diagnosis());
    }

    #[test]
    fn severity_orders_critical_highest() {
        assert!(Severity::Critical > Severity::Error);
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }
}
