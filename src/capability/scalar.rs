// SPDX-License-Identifier: MIT

//! Scalar function / outer-join / date-time-literal capability
//! sub-collector (spec §4.6, fourth bullet).
//!
//! A real driver reports these as bitmasks via `SQLGetInfo` with the
//! `SQL_*_FUNCTIONS` family of info types; each mask is fetched with
//! `get_info_u32` and left as `None` when the driver's `SQLGetInfo`
//! doesn't recognize the info type, so probes gating on a specific
//! scalar function see an honest "driver doesn't advertise this" and
//! take the `skip-unsupported` path rather than failing.

use super::info::get_info_u32;
use crate::handles::Connection;
use crate::sys;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScalarFunctionSupport {
    pub string_functions_mask: Option<u32>,
    pub numeric_functions_mask: Option<u32>,
    pub datetime_functions_mask: Option<u32>,
    pub system_functions_mask: Option<u32>,
    pub convert_functions_mask: Option<u32>,
    pub outer_join_mask: Option<u32>,
    pub datetime_literals_mask: Option<u32>,
    pub interval_add_mask: Option<u32>,
    pub interval_diff_mask: Option<u32>,
}

impl ScalarFunctionSupport {
    pub fn supports_string_bit(&self, bit: u32) -> bool {
        self.string_functions_mask
            .map(|m| m & bit != 0)
            .unwrap_or(false)
    }

    pub fn supports_numeric_bit(&self, bit: u32) -> bool {
        self.numeric_functions_mask
            .map(|m| m & bit != 0)
            .unwrap_or(false)
    }

    pub fn supports_datetime_bit(&self, bit: u32) -> bool {
        self.datetime_functions_mask
            .map(|m| m & bit != 0)
            .unwrap_or(false)
    }

    pub fn supports_outer_join_bit(&self, bit: u32) -> bool {
        self.outer_join_mask.map(|m| m & bit != 0).unwrap_or(false)
    }

    pub fn supports_interval_add_bit(&self, bit: u32) -> bool {
        self.interval_add_mask.map(|m| m & bit != 0).unwrap_or(false)
    }
}

pub(super) fn collect_scalar_functions(conn: &Connection) -> ScalarFunctionSupport {
    ScalarFunctionSupport {
        string_functions_mask: get_info_u32(conn, sys::SQL_STRING_FUNCTIONS),
        numeric_functions_mask: get_info_u32(conn, sys::SQL_NUMERIC_FUNCTIONS),
        datetime_functions_mask: get_info_u32(conn, sys::SQL_TIMEDATE_FUNCTIONS),
        system_functions_mask: get_info_u32(conn, sys::SQL_SYSTEM_FUNCTIONS),
        convert_functions_mask: get_info_u32(conn, sys::SQL_CONVERT_FUNCTIONS),
        outer_join_mask: get_info_u32(conn, sys::SQL_OJ_CAPABILITIES),
        datetime_literals_mask: get_info_u32(conn, sys::SQL_DATETIME_LITERALS),
        interval_add_mask: get_info_u32(conn, sys::SQL_TIMEDATE_ADD_INTERVALS),
        interval_diff_mask: get_info_u32(conn, sys::SQL_TIMEDATE_DIFF_INTERVALS),
    }
}

#[cfg(all(test, feature = "mock-driver"))]
mod tests {
    use super::*;
    use crate::handles::Environment;
    use crate::mock;

    #[test]
    fn driver_advertises_a_string_function_mask() {
        mock::reset();
        let env = Environment::new().unwrap();
        let mut conn = Connection::new(&env).unwrap();
        conn.connect("Driver={Mock ODBC Driver};Mode=Success;").unwrap();

        let scalar = collect_scalar_functions(&conn);
        assert!(scalar.supports_string_bit(sys::SQL_FN_STR_SUBSTRING));
        assert!(scalar.supports_numeric_bit(sys::SQL_FN_NUM_ABS));
        assert!(scalar.supports_outer_join_bit(sys::SQL_OJ_LEFT));
    }

    #[test]
    fn unrecognized_driver_function_bit_is_absent() {
        mock::reset();
        let env = Environment::new().unwrap();
        let mut conn = Connection::new(&env).unwrap();
        conn.connect("Driver={Mock ODBC Driver};Mode=Success;").unwrap();

        let scalar = collect_scalar_functions(&conn);
        assert!(!scalar.supports_string_bit(sys::SQL_FN_STR_REPEAT));
    }
}
