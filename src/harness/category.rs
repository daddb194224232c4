// SPDX-License-Identifier: MIT

//! Probe authoring surface: a [`Category`] groups a handful of named
//! [`Probe`]s that share setup. Categories are registered with the
//! [`crate::harness::runner`] in catalog order (spec §4.8).

use crate::capability::CapabilitySnapshot;
use crate::handles::Connection;
use crate::harness::result::TestResult;

/// Everything a probe body needs: the live connection and the capability
/// snapshot collected once up front, so probes gate on real driver
/// capabilities instead of guessing.
pub struct ProbeContext<'a> {
    pub conn: &'a Connection<'a>,
    pub capabilities: &'a CapabilitySnapshot,
    /// The connection string the harness used to establish `conn`, kept
    /// around so probes that need a second, independent connection (the
    /// connection-lifecycle and state-machine categories) can open one
    /// against the same driver without the core exposing it generally.
    pub connection_string: &'a str,
}

/// A single named probe body. Plain `fn` pointers: probes hold no state of
/// their own between runs, matching spec §4.8's requirement that every
/// probe leave the connection in a recoverable state for the next one.
pub type ProbeFn = fn(&ProbeContext) -> TestResult;

pub struct Probe {
    pub name: &'static str,
    pub run: ProbeFn,
}

impl Probe {
    pub const fn new(name: &'static str, run: ProbeFn) -> Self {
        Probe { name, run }
    }
}

/// One of the catalog's conformance categories (spec §4.8 names 23 of
/// these: connection behavior, statement lifecycle, metadata depth, and so
/// on). A category is just a name plus an ordered probe list; the runner
/// supplies the crash guard, timing, and result aggregation around each
/// probe individually.
pub trait Category {
    fn name(&self) -> &'static str;
    fn probes(&self) -> Vec<Probe>;
}
