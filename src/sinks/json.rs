// SPDX-License-Identifier: MIT

//! Structured JSON report sink (spec §4.9, JSON report schema).
//!
//! Builds the whole report in memory and serializes once in `finish`,
//! rather than streaming NDJSON — the spec's schema is one JSON object
//! per run, not one object per probe.

use crate::capability::CapabilitySnapshot;
use crate::harness::{CategoryReport, RunSummary};
use crate::sinks::Sink;
use serde::Serialize;
use std::io::Write;

/// Bumped if the report schema changes in a way that isn't purely
/// additive. Consumers should treat an unrecognized value as "a newer
/// schema than I understand," not an error.
const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct Report<'a> {
    schema_version: u32,
    connection_string: &'a str,
    driver_info: &'a CapabilitySnapshot,
    categories: &'a [CategoryReport],
    summary: &'a RunSummary,
}

pub struct JsonSink<W: Write> {
    out: W,
    pretty: bool,
    connection_string: String,
    capabilities: CapabilitySnapshot,
    categories: Vec<CategoryReport>,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        JsonSink {
            out,
            pretty,
            connection_string: String::new(),
            capabilities: CapabilitySnapshot::default(),
            categories: Vec::new(),
        }
    }
}

impl<W: Write> Sink for JsonSink<W> {
    fn start(&mut self, connection_string: &str, capabilities: &CapabilitySnapshot) {
        self.connection_string = connection_string.to_string();
        self.capabilities = capabilities.clone();
    }

    fn report_category(&mut self, report: &CategoryReport) {
        self.categories.push(report.clone());
    }

    fn finish(&mut self, summary: &RunSummary) {
        let report = Report {
            schema_version: SCHEMA_VERSION,
            connection_string: &self.connection_string,
            driver_info: &self.capabilities,
            categories: &self.categories,
            summary,
        };

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };

        match rendered {
            Ok(text) => {
                let _ = writeln!(self.out, "{text}");
            }
            Err(e) => {
                let _ = writeln!(self.out, "{{\"error\":\"failed to serialize report: {e}\"}}");
            }
        }
    }
}

#[cfg(all(test, feature = "mock-driver"))]
mod tests {
    use super::*;
    use crate::harness::{CategoryTally, Conformance, RunSummary, TestResult};

    #[test]
    fn finish_emits_a_single_json_object_with_expected_top_level_keys() {
        let mut buf = Vec::new();
        let mut sink = JsonSink::new(&mut buf, false);
        sink.start("Driver={Mock};", &CapabilitySnapshot::default());
        sink.report_category(&CategoryReport {
            category: "Connection".to_string(),
            results: vec![TestResult::pass(
                "c1",
                "SQLConnect",
                "connects",
                "connected",
                Conformance::Core,
                "§4.2",
            )],
            tally: CategoryTally {
                pass: 1,
                ..Default::default()
            },
        });
        sink.finish(&RunSummary {
            categories: 1,
            ..Default::default()
        });

        let text = String::from_utf8(buf).unwrap();
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["schema_version"], 1);
        assert_eq!(value["connection_string"], "Driver={Mock};");
        assert!(value["categories"].is_array());
        assert!(value["summary"].is_object());
    }
}
