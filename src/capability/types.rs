// SPDX-License-Identifier: MIT

//! Type catalog sub-collector (spec §4.6, second bullet).
//!
//! Uses by-column `SQLGetData` retrieval, never column binding: some
//! drivers crash when column binding is combined with `SQLGetTypeInfo`.

use crate::driver;
use crate::handles::{Connection, Statement};
use crate::sys::{self};
use serde::Serialize;

/// One row of the driver's advertised type catalog.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TypeInfo {
    pub type_name: String,
    pub sql_type: i16,
    pub column_size: Option<i32>,
    pub literal_prefix: Option<String>,
    pub literal_suffix: Option<String>,
    pub create_params: Option<String>,
    pub nullable: Option<i16>,
    pub case_sensitive: Option<bool>,
    pub searchable: Option<i16>,
    pub unsigned: Option<bool>,
    pub fixed_prec_scale: Option<bool>,
    pub auto_unique_value: Option<bool>,
    pub local_type_name: Option<String>,
    pub minimum_scale: Option<i16>,
    pub maximum_scale: Option<i16>,
    pub sql_data_type: Option<i16>,
    pub sql_datetime_sub: Option<i16>,
    pub num_prec_radix: Option<i32>,
}

fn get_data_char(stmt: &Statement, col: u16) -> Option<String> {
    let mut buf = [0u8; 256];
    let mut indicator: sys::SQLLEN = 0;
    let rc = unsafe {
        driver::SQLGetData(
            stmt.handle(),
            col,
            sys::SQL_C_CHAR,
            buf.as_mut_ptr() as sys::SQLPOINTER,
            buf.len() as sys::SQLLEN,
            &mut indicator,
        )
    };
    if !sys::sql_succeeded(rc) || indicator < 0 {
        return None;
    }
    let len = (indicator as usize).min(buf.len());
    let nul = buf[..len].iter().position(|&b| b == 0).unwrap_or(len);
    Some(String::from_utf8_lossy(&buf[..nul]).into_owned())
}

fn get_data_i16(stmt: &Statement, col: u16) -> Option<i16> {
    let mut value: i16 = 0;
    let mut indicator: sys::SQLLEN = 0;
    let rc = unsafe {
        driver::SQLGetData(
            stmt.handle(),
            col,
            sys::SQL_C_SSHORT,
            &mut value as *mut i16 as sys::SQLPOINTER,
            0,
            &mut indicator,
        )
    };
    if sys::sql_succeeded(rc) && indicator != sys::SQL_NULL_DATA {
        Some(value)
    } else {
        None
    }
}

fn get_data_i32(stmt: &Statement, col: u16) -> Option<i32> {
    let mut value: i32 = 0;
    let mut indicator: sys::SQLLEN = 0;
    let rc = unsafe {
        driver::SQLGetData(
            stmt.handle(),
            col,
            sys::SQL_C_SLONG,
            &mut value as *mut i32 as sys::SQLPOINTER,
            0,
            &mut indicator,
        )
    };
    if sys::sql_succeeded(rc) && indicator != sys::SQL_NULL_DATA {
        Some(value)
    } else {
        None
    }
}

fn get_data_bool(stmt: &Statement, col: u16) -> Option<bool> {
    get_data_i16(stmt, col).map(|v| v != 0)
}

pub(super) fn collect_types(conn: &Connection) -> Vec<TypeInfo> {
    let stmt = match Statement::new(conn) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let rc = unsafe { driver::SQLGetTypeInfo(stmt.handle(), sys::SQL_ALL_TYPES) };
    if !sys::sql_succeeded(rc) {
        return Vec::new();
    }

    let mut out = Vec::new();
    while matches!(stmt.fetch(), Ok(true)) {
        let type_name = get_data_char(&stmt, 1).unwrap_or_default();
        let sql_type = get_data_i16(&stmt, 2).unwrap_or(0);
        let column_size = get_data_i32(&stmt, 3);
        let literal_prefix = get_data_char(&stmt, 4);
        let literal_suffix = get_data_char(&stmt, 5);
        let create_params = get_data_char(&stmt, 6);
        let nullable = get_data_i16(&stmt, 7);
        let case_sensitive = get_data_bool(&stmt, 8);
        let searchable = get_data_i16(&stmt, 9);
        let unsigned = get_data_bool(&stmt, 10);
        let fixed_prec_scale = get_data_bool(&stmt, 11);
        let auto_unique_value = get_data_bool(&stmt, 12);
        let local_type_name = get_data_char(&stmt, 13);
        let minimum_scale = get_data_i16(&stmt, 14);
        let maximum_scale = get_data_i16(&stmt, 15);
        let sql_data_type = get_data_i16(&stmt, 16);
        let sql_datetime_sub = get_data_i16(&stmt, 17);
        let num_prec_radix = get_data_i32(&stmt, 18);
        out.push(TypeInfo {
            type_name,
            sql_type,
            column_size,
            literal_prefix,
            literal_suffix,
            create_params,
            nullable,
            case_sensitive,
            searchable,
            unsigned,
            fixed_prec_scale,
            auto_unique_value,
            local_type_name,
            minimum_scale,
            maximum_scale,
            sql_data_type,
            sql_datetime_sub,
            num_prec_radix,
        });
    }
    out
}

#[cfg(all(test, feature = "mock-driver"))]
mod tests {
    use super::*;
    use crate::handles::Environment;
    use crate::mock;

    #[test]
    fn collects_the_mock_type_catalog() {
        mock::reset();
        let env = Environment::new().unwrap();
        let mut conn = Connection::new(&env).unwrap();
        conn.connect("Driver={Mock ODBC Driver};Mode=Success;").unwrap();

        let types = collect_types(&conn);
        assert_eq!(types.len(), 3);
        assert!(types.iter().any(|t| t.type_name == "VARCHAR"));
        assert!(types.iter().any(|t| t.sql_type == 4));

        let varchar = types.iter().find(|t| t.type_name == "VARCHAR").unwrap();
        assert_eq!(varchar.literal_prefix.as_deref(), Some("'"));
        assert_eq!(varchar.literal_suffix.as_deref(), Some("'"));
        assert_eq!(varchar.create_params.as_deref(), Some("length"));
        assert_eq!(varchar.nullable, Some(1));
        assert_eq!(varchar.case_sensitive, Some(true));
        assert_eq!(varchar.searchable, Some(3));
        assert_eq!(varchar.unsigned, None);
        assert_eq!(varchar.local_type_name.as_deref(), Some("VARCHAR"));

        let integer = types.iter().find(|t| t.type_name == "INTEGER").unwrap();
        assert_eq!(integer.unsigned, Some(false));
        assert_eq!(integer.minimum_scale, Some(0));
        assert_eq!(integer.maximum_scale, Some(0));
        assert_eq!(integer.sql_data_type, Some(4));
        assert_eq!(integer.num_prec_radix, Some(10));
    }
}
