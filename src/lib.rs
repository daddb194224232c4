// SPDX-License-Identifier: MIT

//! `odbc_crusher`: a driver-conformance probe for the ODBC (Call-Level
//! Interface) standard.
//!
//! Connects to an arbitrary driver through the system driver manager,
//! discovers what it advertises about itself, then runs a fixed catalog
//! of behavioral probes against it — producing a pass/fail/skip/error
//! report with severities, conformance tiers, spec citations, and
//! remediation hints for anything that didn't pass clean.
//!
//! The library crate exposes every layer standalone (`sys`, `handles`,
//! `capability`, `harness`, `probes`, `sinks`) so the binary in
//! `src/main.rs` is a thin CLI wrapper, and so the mock-driver test suite
//! can exercise the whole stack without a real driver manager installed.

pub mod capability;
pub mod crash_guard;
pub mod driver;
pub mod error;
pub mod handles;
pub mod harness;
pub mod probes;
pub mod sinks;
pub mod sys;
pub mod vocabulary;
pub mod widechar;

#[cfg(feature = "mock-driver")]
pub mod mock;

pub use error::OdbcError;
pub use harness::{run_categories, RunSummary, TestResult, TestStatus};
