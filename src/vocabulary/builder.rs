// SPDX-License-Identifier: MIT

//! Fluent result builder for probes whose outcome isn't known until
//! several steps in — most catalog-depth and error-queue probes accumulate
//! `expected`/`actual` text incrementally rather than knowing it all at
//! the call site the way [`crate::harness::TestResult::pass`] assumes.

use crate::harness::{Conformance, Severity, TestResult, TestStatus};

pub struct ResultBuilder {
    test_name: String,
    function: String,
    conformance: Conformance,
    spec_reference: String,
    status: TestStatus,
    severity: Severity,
    expected: String,
    actual: String,
    diagnostic: Option<String>,
    suggestion: Option<String>,
}

impl ResultBuilder {
    pub fn new(test_name: impl Into<String>, function: impl Into<String>, conformance: Conformance, spec_reference: impl Into<String>) -> Self {
        ResultBuilder {
            test_name: test_name.into(),
            function: function.into(),
            conformance,
            spec_reference: spec_reference.into(),
            status: TestStatus::Pass,
            severity: Severity::Info,
            expected: String::new(),
            actual: String::new(),
            diagnostic: None,
            suggestion: None,
        }
    }

    pub fn expected(mut self, text: impl Into<String>) -> Self {
        self.expected = text.into();
        self
    }

    pub fn actual(mut self, text: impl Into<String>) -> Self {
        self.actual = text.into();
        self
    }

    pub fn diagnostic(mut self, text: impl Into<String>) -> Self {
        self.diagnostic = Some(text.into());
        self
    }

    pub fn suggestion(mut self, text: impl Into<String>) -> Self {
        self.suggestion = Some(text.into());
        self
    }

    pub fn fail(mut self, severity: Severity) -> Self {
        self.status = TestStatus::Fail;
        self.severity = severity;
        self
    }

    pub fn error(mut self) -> Self {
        self.status = TestStatus::Error;
        self.severity = Severity::Error;
        self
    }

    pub fn skip_inconclusive(mut self) -> Self {
        self.status = TestStatus::SkipInconclusive;
        self.severity = Severity::Warning;
        self
    }

    pub fn build(self) -> TestResult {
        let mut result = TestResult::new(
            self.test_name,
            self.function,
            self.status,
            self.expected,
            self.actual,
            self.severity,
            self.conformance,
            self.spec_reference,
        );
        result.diagnostic = self.diagnostic;
        result.suggestion = self.suggestion;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_a_pass() {
        let r = ResultBuilder::new("t", "SQLConnect", Conformance::Core, "n/a")
            .expected("ok")
            .actual("ok")
            .build();
        assert_eq!(r.status, TestStatus::Pass);
    }

    #[test]
    fn fail_overrides_status_and_severity() {
        let r = ResultBuilder::new("t", "SQLConnect", Conformance::Core, "n/a")
            .expected("ok")
            .actual("boom")
            .diagnostic("driver returned SQL_ERROR")
            .fail(Severity::Critical)
            .build();
        assert_eq!(r.status, TestStatus::Fail);
        assert_eq!(r.severity, Severity::Critical);
        assert_eq!(r.diagnostic.as_deref(), Some("driver returned SQL_ERROR"));
    }
}
