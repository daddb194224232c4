// SPDX-License-Identifier: MIT

//! Category 10: wide-character surface (spec §4.8 item 10). The "widen
//! then scan" round trip (spec §8) is exercised directly against
//! [`crate::widechar`]; `wide_entry_point_falls_back_to_narrow_on_failure`
//! drives `SQLGetInfoW` and falls back to the narrow `SQLGetInfo` form
//! when the wide call's return code isn't in the success set, per spec
//! §4.5/§9's wide-to-narrow fallback law.

use crate::driver;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};
use crate::sys;
use crate::widechar::{decode_wide, scan_to_narrow, WideBuffer};

pub struct WideSurfaceCategory;

impl Category for WideSurfaceCategory {
    fn name(&self) -> &'static str {
        "Wide-Character Surface"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("widen-then-scan-roundtrips-ascii", widen_then_scan_roundtrips_ascii),
            Probe::new(
                "wide-entry-point-falls-back-to-narrow-on-failure",
                wide_entry_point_falls_back_to_narrow_on_failure,
            ),
        ]
    }
}

fn widen_then_scan_roundtrips_ascii(_ctx: &ProbeContext) -> TestResult {
    let samples = ["", "a", "driver name", "MockDB 1.0"];
    for s in samples {
        let wide = WideBuffer::from_str(s);
        let narrow = scan_to_narrow(&wide);
        if narrow != s {
            return TestResult::fail(
                "widen-then-scan-roundtrips-ascii",
                "widechar::scan_to_narrow",
                "decoding a widened ASCII string yields the original string",
                format!("{s:?} widened and scanned back as {narrow:?}"),
                Severity::Error,
                Conformance::Core,
                "spec.md §8 round-trip laws",
            );
        }
    }
    TestResult::pass(
        "widen-then-scan-roundtrips-ascii",
        "widechar::scan_to_narrow",
        "decoding a widened ASCII string yields the original string",
        "all samples round-tripped",
        Conformance::Core,
        "spec.md §8 round-trip laws",
    )
}

/// Tries `SQLGetInfoW(SQL_DRIVER_NAME)` first; a return code outside the
/// success set falls back to the narrow `SQLGetInfo` form instead of
/// treating the wide call's failure as the probe's own failure (spec
/// §4.5/§9's wide-to-narrow fallback law).
fn wide_entry_point_falls_back_to_narrow_on_failure(ctx: &ProbeContext) -> TestResult {
    let mut wide_buf = [0u16; 128];
    let mut wide_len: sys::SQLSMALLINT = 0;
    let wide_rc = unsafe {
        driver::SQLGetInfoW(
            ctx.conn.handle(),
            sys::SQL_DRIVER_NAME,
            wide_buf.as_mut_ptr() as sys::SQLPOINTER,
            (wide_buf.len() * std::mem::size_of::<u16>()) as sys::SQLSMALLINT,
            &mut wide_len,
        )
    };

    if sys::sql_succeeded(wide_rc) {
        let name = decode_wide(&wide_buf, wide_len.max(0) as usize);
        return TestResult::pass(
            "wide-entry-point-falls-back-to-narrow-on-failure",
            "SQLGetInfoW",
            "SQLGetInfoW(SQL_DRIVER_NAME) returns the driver name",
            name,
            Conformance::Level1,
            "spec.md §4.8 item 10",
        );
    }

    let mut narrow_buf = [0u8; 128];
    let mut narrow_len: sys::SQLSMALLINT = 0;
    let narrow_rc = unsafe {
        driver::SQLGetInfo(
            ctx.conn.handle(),
            sys::SQL_DRIVER_NAME,
            narrow_buf.as_mut_ptr() as sys::SQLPOINTER,
            narrow_buf.len() as sys::SQLSMALLINT,
            &mut narrow_len,
        )
    };
    if !sys::sql_succeeded(narrow_rc) {
        return TestResult::fail(
            "wide-entry-point-falls-back-to-narrow-on-failure",
            "SQLGetInfoW/SQLGetInfo",
            "a wide SQLGetInfoW failure falls back to a working narrow SQLGetInfo call",
            "both the wide and narrow forms failed",
            Severity::Error,
            Conformance::Level1,
            "spec.md §4.5/§9 wide-to-narrow fallback",
        );
    }
    let len = (narrow_len.max(0) as usize).min(narrow_buf.len());
    let name = String::from_utf8_lossy(&narrow_buf[..len]).into_owned();
    TestResult::pass(
        "wide-entry-point-falls-back-to-narrow-on-failure",
        "SQLGetInfo",
        "a wide SQLGetInfoW failure falls back to a working narrow SQLGetInfo call",
        name,
        Conformance::Level1,
        "spec.md §4.5/§9 wide-to-narrow fallback",
    )
}
