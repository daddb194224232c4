// SPDX-License-Identifier: MIT

//! Raw Call-Level Interface (CLI/ODBC) declarations.
//!
//! This is a hand-written, minimal port of the subset of `sql.h`/`sqlext.h`
//! the probe catalog needs. Nothing here is safe; every function is declared
//! `extern "C"` and resolved against whatever driver manager is on the
//! system library path at link time (unixODBC's `libodbc.so` on Unix,
//! `odbc32.dll` on Windows). The wrappers in [`crate::handles`] are the
//! only code permitted to call into this module directly.

#![allow(non_camel_case_types, non_snake_case, dead_code)]

use libc::{c_char, c_double, c_int, c_short, c_void};

pub type SQLHANDLE = *mut c_void;
pub type SQLHENV = SQLHANDLE;
pub type SQLHDBC = SQLHANDLE;
pub type SQLHSTMT = SQLHANDLE;
pub type SQLHDESC = SQLHANDLE;

pub type SQLRETURN = c_short;
pub type SQLSMALLINT = c_short;
pub type SQLUSMALLINT = libc::c_ushort;
pub type SQLINTEGER = c_int;
pub type SQLUINTEGER = libc::c_uint;
pub type SQLLEN = isize;
pub type SQLULEN = usize;
pub type SQLCHAR = libc::c_uchar;
pub type SQLWCHAR = u16;
pub type SQLPOINTER = *mut c_void;
pub type SQLDOUBLE = c_double;

pub const SQL_NULL_HANDLE: SQLHANDLE = std::ptr::null_mut();

pub const SQL_HANDLE_ENV: SQLSMALLINT = 1;
pub const SQL_HANDLE_DBC: SQLSMALLINT = 2;
pub const SQL_HANDLE_STMT: SQLSMALLINT = 3;
pub const SQL_HANDLE_DESC: SQLSMALLINT = 4;

pub const SQL_SUCCESS: SQLRETURN = 0;
pub const SQL_SUCCESS_WITH_INFO: SQLRETURN = 1;
pub const SQL_NO_DATA: SQLRETURN = 100;
pub const SQL_ERROR: SQLRETURN = -1;
pub const SQL_INVALID_HANDLE: SQLRETURN = -2;
pub const SQL_STILL_EXECUTING: SQLRETURN = 2;
pub const SQL_NEED_DATA: SQLRETURN = 99;

#[inline]
pub fn sql_succeeded(rc: SQLRETURN) -> bool {
    rc == SQL_SUCCESS || rc == SQL_SUCCESS_WITH_INFO
}

pub const SQL_ATTR_ODBC_VERSION: SQLINTEGER = 200;
pub const SQL_OV_ODBC3: SQLINTEGER = 3;

pub const SQL_NTS: SQLINTEGER = -3;

pub const SQL_DRIVER_NOPROMPT: SQLUSMALLINT = 0;

pub const SQL_CLOSE: SQLUSMALLINT = 0;
pub const SQL_DROP: SQLUSMALLINT = 1;
pub const SQL_UNBIND: SQLUSMALLINT = 2;
pub const SQL_RESET_PARAMS: SQLUSMALLINT = 3;

pub const SQL_ATTR_AUTOCOMMIT: SQLINTEGER = 102;
pub const SQL_AUTOCOMMIT_OFF: SQLUINTEGER = 0;
pub const SQL_AUTOCOMMIT_ON: SQLUINTEGER = 1;

pub const SQL_ALL_TYPES: SQLSMALLINT = 0;

pub const SQL_MAX_MESSAGE_LENGTH: usize = 512;

pub const SQL_COMMIT: SQLSMALLINT = 0;
pub const SQL_ROLLBACK: SQLSMALLINT = 1;

pub const SQL_C_CHAR: SQLSMALLINT = 1;
pub const SQL_C_WCHAR: SQLSMALLINT = -8;
pub const SQL_C_SSHORT: SQLSMALLINT = 5;
pub const SQL_C_SLONG: SQLSMALLINT = 4;
pub const SQL_C_DOUBLE: SQLSMALLINT = 8;
pub const SQL_C_NUMERIC: SQLSMALLINT = 2;

pub const SQL_NO_TOTAL: SQLLEN = -4;
pub const SQL_NULL_DATA: SQLLEN = -1;

// SQL (as opposed to C) data types, for SQLBindParameter's parameter_type.
pub const SQL_CHAR: SQLSMALLINT = 1;
pub const SQL_VARCHAR: SQLSMALLINT = 12;
pub const SQL_WVARCHAR: SQLSMALLINT = -9;
pub const SQL_INTEGER: SQLSMALLINT = 4;
pub const SQL_NUMERIC: SQLSMALLINT = 2;

pub const SQL_PARAM_INPUT: SQLSMALLINT = 1;

// Info type identifiers used by SQLGetInfo (subset).
pub const SQL_DRIVER_NAME: SQLUSMALLINT = 6;
pub const SQL_DRIVER_VER: SQLUSMALLINT = 7;
pub const SQL_DBMS_NAME: SQLUSMALLINT = 17;
pub const SQL_DBMS_VER: SQLUSMALLINT = 18;
pub const SQL_ODBC_VER: SQLUSMALLINT = 10;
pub const SQL_CATALOG_TERM: SQLUSMALLINT = 42;
pub const SQL_SCHEMA_TERM: SQLUSMALLINT = 39;
pub const SQL_TABLE_TERM: SQLUSMALLINT = 45;
pub const SQL_PROCEDURE_TERM: SQLUSMALLINT = 40;
pub const SQL_IDENTIFIER_QUOTE_CHAR: SQLUSMALLINT = 29;
pub const SQL_USER_NAME: SQLUSMALLINT = 47;
pub const SQL_SERVER_NAME: SQLUSMALLINT = 13;
pub const SQL_DATABASE_NAME: SQLUSMALLINT = 16;
pub const SQL_SQL_CONFORMANCE: SQLUSMALLINT = 118;
pub const SQL_ODBC_INTERFACE_CONFORMANCE: SQLUSMALLINT = 152;
pub const SQL_MAX_CONCURRENT_ACTIVITIES: SQLUSMALLINT = 1;
pub const SQL_MAX_IDENTIFIER_LEN: SQLUSMALLINT = 10005;

// Scalar-function / escape-sequence info types (SQLGetInfo, spec §4.8 item 20).
pub const SQL_CONVERT_FUNCTIONS: SQLUSMALLINT = 48;
pub const SQL_NUMERIC_FUNCTIONS: SQLUSMALLINT = 49;
pub const SQL_STRING_FUNCTIONS: SQLUSMALLINT = 50;
pub const SQL_SYSTEM_FUNCTIONS: SQLUSMALLINT = 51;
pub const SQL_TIMEDATE_FUNCTIONS: SQLUSMALLINT = 52;
pub const SQL_TIMEDATE_ADD_INTERVALS: SQLUSMALLINT = 109;
pub const SQL_TIMEDATE_DIFF_INTERVALS: SQLUSMALLINT = 110;
pub const SQL_DATETIME_LITERALS: SQLUSMALLINT = 119;
pub const SQL_OJ_CAPABILITIES: SQLUSMALLINT = 115;

// SQL_FN_STR_* bits (SQL_STRING_FUNCTIONS).
pub const SQL_FN_STR_CONCAT: u32 = 0x0000_0001;
pub const SQL_FN_STR_INSERT: u32 = 0x0000_0002;
pub const SQL_FN_STR_LEFT: u32 = 0x0000_0004;
pub const SQL_FN_STR_LTRIM: u32 = 0x0000_0008;
pub const SQL_FN_STR_LENGTH: u32 = 0x0000_0010;
pub const SQL_FN_STR_LOCATE: u32 = 0x0000_0020;
pub const SQL_FN_STR_LCASE: u32 = 0x0000_0040;
pub const SQL_FN_STR_REPEAT: u32 = 0x0000_0080;
pub const SQL_FN_STR_REPLACE: u32 = 0x0000_0100;
pub const SQL_FN_STR_RIGHT: u32 = 0x0000_0200;
pub const SQL_FN_STR_RTRIM: u32 = 0x0000_0400;
pub const SQL_FN_STR_SUBSTRING: u32 = 0x0000_0800;
pub const SQL_FN_STR_UCASE: u32 = 0x0000_1000;
pub const SQL_FN_STR_ASCII: u32 = 0x0000_2000;
pub const SQL_FN_STR_CHAR: u32 = 0x0000_4000;

// SQL_FN_NUM_* bits (SQL_NUMERIC_FUNCTIONS).
pub const SQL_FN_NUM_ABS: u32 = 0x0000_0001;
pub const SQL_FN_NUM_ACOS: u32 = 0x0000_0002;
pub const SQL_FN_NUM_ASIN: u32 = 0x0000_0004;
pub const SQL_FN_NUM_ATAN: u32 = 0x0000_0008;
pub const SQL_FN_NUM_CEILING: u32 = 0x0000_0020;
pub const SQL_FN_NUM_COS: u32 = 0x0000_0040;
pub const SQL_FN_NUM_FLOOR: u32 = 0x0000_0200;
pub const SQL_FN_NUM_MOD: u32 = 0x0000_0800;
pub const SQL_FN_NUM_SIGN: u32 = 0x0000_1000;
pub const SQL_FN_NUM_SQRT: u32 = 0x0000_4000;
pub const SQL_FN_NUM_ROUND: u32 = 0x0040_0000;
pub const SQL_FN_NUM_POWER: u32 = 0x0010_0000;

// SQL_FN_TD_* bits (SQL_TIMEDATE_FUNCTIONS).
pub const SQL_FN_TD_NOW: u32 = 0x0000_0001;
pub const SQL_FN_TD_CURDATE: u32 = 0x0000_0002;
pub const SQL_FN_TD_DAYOFMONTH: u32 = 0x0000_0004;
pub const SQL_FN_TD_MONTH: u32 = 0x0000_0020;
pub const SQL_FN_TD_YEAR: u32 = 0x0000_0100;
pub const SQL_FN_TD_CURTIME: u32 = 0x0000_0200;
pub const SQL_FN_TD_HOUR: u32 = 0x0000_0400;
pub const SQL_FN_TD_MINUTE: u32 = 0x0000_0800;
pub const SQL_FN_TD_SECOND: u32 = 0x0000_1000;

// SQL_FN_SYS_* bits (SQL_SYSTEM_FUNCTIONS).
pub const SQL_FN_SYS_USERNAME: u32 = 0x0000_0001;
pub const SQL_FN_SYS_DBNAME: u32 = 0x0000_0002;
pub const SQL_FN_SYS_IFNULL: u32 = 0x0000_0004;

// SQL_FN_CVT_* bits (SQL_CONVERT_FUNCTIONS).
pub const SQL_FN_CVT_CONVERT: u32 = 0x0000_0001;

// SQL_OJ_* bits (SQL_OJ_CAPABILITIES).
pub const SQL_OJ_LEFT: u32 = 0x0000_0001;
pub const SQL_OJ_RIGHT: u32 = 0x0000_0002;
pub const SQL_OJ_FULL: u32 = 0x0000_0004;

// SQL_DL_* bits (SQL_DATETIME_LITERALS).
pub const SQL_DL_SQL92_DATE: u32 = 0x0000_0001;
pub const SQL_DL_SQL92_TIME: u32 = 0x0000_0002;
pub const SQL_DL_SQL92_TIMESTAMP: u32 = 0x0000_0004;

// SQL_FN_TSI_* bits (SQL_TIMEDATE_ADD_INTERVALS / SQL_TIMEDATE_DIFF_INTERVALS).
pub const SQL_FN_TSI_DAY: u32 = 0x0000_0008;
pub const SQL_FN_TSI_MONTH: u32 = 0x0000_0080;
pub const SQL_FN_TSI_YEAR: u32 = 0x0000_0100;

// Statement attribute ids (SQLSetStmtAttr/SQLGetStmtAttr).
pub const SQL_ATTR_CURSOR_TYPE: SQLINTEGER = 6;
pub const SQL_ATTR_PARAMSET_SIZE: SQLINTEGER = 22;
pub const SQL_ATTR_PARAMS_PROCESSED_PTR: SQLINTEGER = 21;
pub const SQL_ATTR_APP_ROW_DESC: SQLINTEGER = 10010;
pub const SQL_ATTR_APP_PARAM_DESC: SQLINTEGER = 10011;

pub const SQL_CURSOR_FORWARD_ONLY: SQLULEN = 0;
pub const SQL_CURSOR_STATIC: SQLULEN = 3;

// Descriptor field ids (SQLGetDescField/SQLSetDescField).
pub const SQL_DESC_COUNT: SQLSMALLINT = 1001;
pub const SQL_DESC_TYPE: SQLSMALLINT = 1002;
pub const SQL_DESC_NAME: SQLSMALLINT = 1011;

// SQLStatistics `unique` argument.
pub const SQL_INDEX_ALL: SQLUSMALLINT = 0;
pub const SQL_QUICK: SQLUSMALLINT = 0;

// SQLSpecialColumns `identifier_type`/`scope`/`nullable` arguments.
pub const SQL_BEST_ROWID: SQLUSMALLINT = 1;
pub const SQL_SCOPE_CURROW: SQLUSMALLINT = 0;
pub const SQL_NO_NULLS: SQLUSMALLINT = 0;

#[cfg(not(feature = "mock-driver"))]
#[cfg_attr(unix, link(name = "odbc"))]
#[cfg_attr(windows, link(name = "odbc32"))]
extern "C" {
    pub fn SQLAllocHandle(
        handle_type: SQLSMALLINT,
        input_handle: SQLHANDLE,
        output_handle: *mut SQLHANDLE,
    ) -> SQLRETURN;

    pub fn SQLFreeHandle(handle_type: SQLSMALLINT, handle: SQLHANDLE) -> SQLRETURN;

    pub fn SQLSetEnvAttr(
        env: SQLHENV,
        attribute: SQLINTEGER,
        value: SQLPOINTER,
        string_length: SQLINTEGER,
    ) -> SQLRETURN;

    pub fn SQLSetConnectAttr(
        dbc: SQLHDBC,
        attribute: SQLINTEGER,
        value: SQLPOINTER,
        string_length: SQLINTEGER,
    ) -> SQLRETURN;

    pub fn SQLGetConnectAttr(
        dbc: SQLHDBC,
        attribute: SQLINTEGER,
        value: SQLPOINTER,
        buffer_length: SQLINTEGER,
        string_length: *mut SQLINTEGER,
    ) -> SQLRETURN;

    pub fn SQLDriverConnect(
        dbc: SQLHDBC,
        window_handle: SQLHANDLE,
        in_connection_string: *const SQLCHAR,
        string_length1: SQLSMALLINT,
        out_connection_string: *mut SQLCHAR,
        buffer_length: SQLSMALLINT,
        string_length2: *mut SQLSMALLINT,
        driver_completion: SQLUSMALLINT,
    ) -> SQLRETURN;

    pub fn SQLDisconnect(dbc: SQLHDBC) -> SQLRETURN;

    pub fn SQLExecDirect(
        stmt: SQLHSTMT,
        statement_text: *const SQLCHAR,
        text_length: SQLINTEGER,
    ) -> SQLRETURN;

    pub fn SQLPrepare(
        stmt: SQLHSTMT,
        statement_text: *const SQLCHAR,
        text_length: SQLINTEGER,
    ) -> SQLRETURN;

    pub fn SQLExecute(stmt: SQLHSTMT) -> SQLRETURN;

    pub fn SQLFetch(stmt: SQLHSTMT) -> SQLRETURN;

    pub fn SQLFreeStmt(stmt: SQLHSTMT, option: SQLUSMALLINT) -> SQLRETURN;

    pub fn SQLCloseCursor(stmt: SQLHSTMT) -> SQLRETURN;

    pub fn SQLCancel(stmt: SQLHSTMT) -> SQLRETURN;

    pub fn SQLGetData(
        stmt: SQLHSTMT,
        col_or_param_num: SQLUSMALLINT,
        target_type: SQLSMALLINT,
        target_value: SQLPOINTER,
        buffer_length: SQLLEN,
        str_len_or_ind: *mut SQLLEN,
    ) -> SQLRETURN;

    pub fn SQLBindParameter(
        stmt: SQLHSTMT,
        parameter_number: SQLUSMALLINT,
        input_output_type: SQLSMALLINT,
        value_type: SQLSMALLINT,
        parameter_type: SQLSMALLINT,
        column_size: SQLULEN,
        decimal_digits: SQLSMALLINT,
        parameter_value: SQLPOINTER,
        buffer_length: SQLLEN,
        str_len_or_ind: *mut SQLLEN,
    ) -> SQLRETURN;

    pub fn SQLNumResultCols(stmt: SQLHSTMT, column_count: *mut SQLSMALLINT) -> SQLRETURN;

    pub fn SQLRowCount(stmt: SQLHSTMT, row_count: *mut SQLLEN) -> SQLRETURN;

    pub fn SQLGetTypeInfo(stmt: SQLHSTMT, data_type: SQLSMALLINT) -> SQLRETURN;

    pub fn SQLTables(
        stmt: SQLHSTMT,
        catalog_name: *const SQLCHAR,
        catalog_len: SQLSMALLINT,
        schema_name: *const SQLCHAR,
        schema_len: SQLSMALLINT,
        table_name: *const SQLCHAR,
        table_len: SQLSMALLINT,
        table_type: *const SQLCHAR,
        table_type_len: SQLSMALLINT,
    ) -> SQLRETURN;

    pub fn SQLGetInfo(
        dbc: SQLHDBC,
        info_type: SQLUSMALLINT,
        info_value: SQLPOINTER,
        buffer_length: SQLSMALLINT,
        string_length: *mut SQLSMALLINT,
    ) -> SQLRETURN;

    pub fn SQLGetFunctions(
        dbc: SQLHDBC,
        function_id: SQLUSMALLINT,
        supported: *mut SQLUSMALLINT,
    ) -> SQLRETURN;

    pub fn SQLEndTran(handle_type: SQLSMALLINT, handle: SQLHANDLE, completion_type: SQLSMALLINT)
        -> SQLRETURN;

    pub fn SQLGetDiagRec(
        handle_type: SQLSMALLINT,
        handle: SQLHANDLE,
        rec_number: SQLSMALLINT,
        sql_state: *mut SQLCHAR,
        native_error: *mut SQLINTEGER,
        message_text: *mut SQLCHAR,
        buffer_length: SQLSMALLINT,
        text_length: *mut SQLSMALLINT,
    ) -> SQLRETURN;

    pub fn SQLGetInfoW(
        dbc: SQLHDBC,
        info_type: SQLUSMALLINT,
        info_value: SQLPOINTER,
        buffer_length: SQLSMALLINT,
        string_length: *mut SQLSMALLINT,
    ) -> SQLRETURN;

    pub fn SQLGetDataW(
        stmt: SQLHSTMT,
        col_or_param_num: SQLUSMALLINT,
        target_type: SQLSMALLINT,
        target_value: SQLPOINTER,
        buffer_length: SQLLEN,
        str_len_or_ind: *mut SQLLEN,
    ) -> SQLRETURN;

    pub fn SQLColAttribute(
        stmt: SQLHSTMT,
        column_number: SQLUSMALLINT,
        field_identifier: SQLUSMALLINT,
        character_attribute: SQLPOINTER,
        buffer_length: SQLSMALLINT,
        string_length: *mut SQLSMALLINT,
        numeric_attribute: *mut SQLLEN,
    ) -> SQLRETURN;

    pub fn SQLColAttributeW(
        stmt: SQLHSTMT,
        column_number: SQLUSMALLINT,
        field_identifier: SQLUSMALLINT,
        character_attribute: SQLPOINTER,
        buffer_length: SQLSMALLINT,
        string_length: *mut SQLSMALLINT,
        numeric_attribute: *mut SQLLEN,
    ) -> SQLRETURN;

    pub fn SQLSetStmtAttr(
        stmt: SQLHSTMT,
        attribute: SQLINTEGER,
        value: SQLPOINTER,
        string_length: SQLINTEGER,
    ) -> SQLRETURN;

    pub fn SQLGetStmtAttr(
        stmt: SQLHSTMT,
        attribute: SQLINTEGER,
        value: SQLPOINTER,
        buffer_length: SQLINTEGER,
        string_length: *mut SQLINTEGER,
    ) -> SQLRETURN;

    pub fn SQLColumns(
        stmt: SQLHSTMT,
        catalog_name: *const SQLCHAR,
        catalog_len: SQLSMALLINT,
        schema_name: *const SQLCHAR,
        schema_len: SQLSMALLINT,
        table_name: *const SQLCHAR,
        table_len: SQLSMALLINT,
        column_name: *const SQLCHAR,
        column_len: SQLSMALLINT,
    ) -> SQLRETURN;

    pub fn SQLPrimaryKeys(
        stmt: SQLHSTMT,
        catalog_name: *const SQLCHAR,
        catalog_len: SQLSMALLINT,
        schema_name: *const SQLCHAR,
        schema_len: SQLSMALLINT,
        table_name: *const SQLCHAR,
        table_len: SQLSMALLINT,
    ) -> SQLRETURN;

    pub fn SQLStatistics(
        stmt: SQLHSTMT,
        catalog_name: *const SQLCHAR,
        catalog_len: SQLSMALLINT,
        schema_name: *const SQLCHAR,
        schema_len: SQLSMALLINT,
        table_name: *const SQLCHAR,
        table_len: SQLSMALLINT,
        unique: SQLUSMALLINT,
        reserved: SQLUSMALLINT,
    ) -> SQLRETURN;

    pub fn SQLSpecialColumns(
        stmt: SQLHSTMT,
        identifier_type: SQLUSMALLINT,
        catalog_name: *const SQLCHAR,
        catalog_len: SQLSMALLINT,
        schema_name: *const SQLCHAR,
        schema_len: SQLSMALLINT,
        table_name: *const SQLCHAR,
        table_len: SQLSMALLINT,
        scope: SQLUSMALLINT,
        nullable: SQLUSMALLINT,
    ) -> SQLRETURN;

    pub fn SQLGetDescField(
        desc: SQLHDESC,
        rec_number: SQLSMALLINT,
        field_identifier: SQLSMALLINT,
        value: SQLPOINTER,
        buffer_length: SQLINTEGER,
        string_length: *mut SQLINTEGER,
    ) -> SQLRETURN;

    pub fn SQLSetDescField(
        desc: SQLHDESC,
        rec_number: SQLSMALLINT,
        field_identifier: SQLSMALLINT,
        value: SQLPOINTER,
        buffer_length: SQLINTEGER,
    ) -> SQLRETURN;

    pub fn SQLCopyDesc(source_desc: SQLHDESC, target_desc: SQLHDESC) -> SQLRETURN;

    pub fn SQLNativeSql(
        dbc: SQLHDBC,
        in_statement_text: *const SQLCHAR,
        text_length1: SQLINTEGER,
        out_statement_text: *mut SQLCHAR,
        buffer_length: SQLINTEGER,
        text_length2: *mut SQLINTEGER,
    ) -> SQLRETURN;
}
