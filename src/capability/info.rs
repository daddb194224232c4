// SPDX-License-Identifier: MIT

//! Driver/DBMS info sub-collector (spec §4.6, first bullet).

use super::CapabilitySnapshot;
use crate::driver;
use crate::handles::Connection;
use crate::sys::{self, SQLUSMALLINT};

fn get_info_string(conn: &Connection, info_type: SQLUSMALLINT) -> Option<String> {
    let mut buf = [0u8; 256];
    let mut out_len: sys::SQLSMALLINT = 0;
    let rc = unsafe {
        driver::SQLGetInfo(
            conn.handle(),
            info_type,
            buf.as_mut_ptr() as sys::SQLPOINTER,
            buf.len() as sys::SQLSMALLINT,
            &mut out_len,
        )
    };
    if !sys::sql_succeeded(rc) {
        return None;
    }
    let len = (out_len.max(0) as usize).min(buf.len());
    let nul = buf[..len].iter().position(|&b| b == 0).unwrap_or(len);
    Some(String::from_utf8_lossy(&buf[..nul]).into_owned())
}

fn get_info_u16(conn: &Connection, info_type: SQLUSMALLINT) -> Option<u32> {
    let mut value: u16 = 0;
    let rc = unsafe {
        driver::SQLGetInfo(
            conn.handle(),
            info_type,
            &mut value as *mut u16 as sys::SQLPOINTER,
            std::mem::size_of::<u16>() as sys::SQLSMALLINT,
            std::ptr::null_mut(),
        )
    };
    if sys::sql_succeeded(rc) {
        Some(value as u32)
    } else {
        None
    }
}

pub(super) fn get_info_u32(conn: &Connection, info_type: SQLUSMALLINT) -> Option<u32> {
    let mut value: u32 = 0;
    let rc = unsafe {
        driver::SQLGetInfo(
            conn.handle(),
            info_type,
            &mut value as *mut u32 as sys::SQLPOINTER,
            std::mem::size_of::<u32>() as sys::SQLSMALLINT,
            std::ptr::null_mut(),
        )
    };
    if sys::sql_succeeded(rc) {
        Some(value)
    } else {
        None
    }
}

pub(super) fn collect_info(conn: &Connection, snapshot: &mut CapabilitySnapshot) {
    snapshot.driver_name = get_info_string(conn, sys::SQL_DRIVER_NAME);
    snapshot.driver_version = get_info_string(conn, sys::SQL_DRIVER_VER);
    snapshot.dbms_name = get_info_string(conn, sys::SQL_DBMS_NAME);
    snapshot.dbms_version = get_info_string(conn, sys::SQL_DBMS_VER);
    snapshot.odbc_version = get_info_string(conn, sys::SQL_ODBC_VER);
    snapshot.catalog_term = get_info_string(conn, sys::SQL_CATALOG_TERM);
    snapshot.schema_term = get_info_string(conn, sys::SQL_SCHEMA_TERM);
    snapshot.table_term = get_info_string(conn, sys::SQL_TABLE_TERM);
    snapshot.procedure_term = get_info_string(conn, sys::SQL_PROCEDURE_TERM);
    snapshot.identifier_quote_char = get_info_string(conn, sys::SQL_IDENTIFIER_QUOTE_CHAR);
    snapshot.user_name = get_info_string(conn, sys::SQL_USER_NAME);
    snapshot.server_name = get_info_string(conn, sys::SQL_SERVER_NAME);
    snapshot.database_name = get_info_string(conn, sys::SQL_DATABASE_NAME);

    snapshot.sql_conformance = get_info_u16(conn, sys::SQL_SQL_CONFORMANCE);
    snapshot.odbc_interface_conformance = get_info_u16(conn, sys::SQL_ODBC_INTERFACE_CONFORMANCE);
    snapshot.max_concurrent_activities = get_info_u16(conn, sys::SQL_MAX_CONCURRENT_ACTIVITIES);
    snapshot.max_identifier_len = get_info_u16(conn, sys::SQL_MAX_IDENTIFIER_LEN);
}

#[cfg(all(test, feature = "mock-driver"))]
mod tests {
    use super::*;
    use crate::handles::Environment;
    use crate::mock;

    #[test]
    fn collects_driver_and_dbms_identity() {
        mock::reset();
        let env = Environment::new().unwrap();
        let mut conn = Connection::new(&env).unwrap();
        conn.connect("Driver={Mock ODBC Driver};Mode=Success;").unwrap();

        let mut snapshot = CapabilitySnapshot::default();
        collect_info(&conn, &mut snapshot);

        assert_eq!(snapshot.driver_name.as_deref(), Some("libmockodbc.so"));
        assert_eq!(snapshot.dbms_name.as_deref(), Some("MockDB"));
        assert!(snapshot.max_identifier_len.is_some());
    }
}
