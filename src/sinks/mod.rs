// SPDX-License-Identifier: MIT

//! Report sinks: where a finished run's results go (spec §4.9).
//!
//! Mirrors `hdds_logger::formatter::LogFormatter`'s trait-per-output-shape
//! design: one small trait, one type per target format, selected by the
//! CLI's `--output` flag.

pub mod console;
pub mod json;

use crate::capability::CapabilitySnapshot;
use crate::harness::{CategoryReport, RunSummary};

/// Where a conformance run's output goes. A sink sees the run as a stream
/// of category reports as they finish, not as one final blob, so a
/// console sink can print progress while a long run is still going.
pub trait Sink {
    /// Called once, before any category has run, with the capability
    /// snapshot discovery already collected.
    fn start(&mut self, connection_string: &str, capabilities: &CapabilitySnapshot);

    /// Called once per category, in run order, as soon as that category's
    /// probes have all finished.
    fn report_category(&mut self, report: &CategoryReport);

    /// Called once, after every category has run.
    fn finish(&mut self, summary: &RunSummary);
}
