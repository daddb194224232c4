// SPDX-License-Identifier: MIT

//! Indirection between the real driver-manager FFI surface ([`crate::sys`])
//! and the in-process fake driver ([`crate::mock`]) used by tests.
//!
//! Every handle wrapper and the diagnostic extractor call through this
//! module instead of `crate::sys` directly, so the entire probe harness —
//! handles, recycle protocol, capability discovery, the probe catalog — can
//! be exercised deterministically in `cargo test` without a real ODBC
//! driver manager on the library path. Types and constants are shared
//! between both backends and still come straight from `crate::sys`.

#[cfg(not(feature = "mock-driver"))]
pub use crate::sys::{
    SQLAllocHandle, SQLBindParameter, SQLCancel, SQLCloseCursor, SQLColAttribute,
    SQLColAttributeW, SQLColumns, SQLCopyDesc, SQLDisconnect, SQLDriverConnect, SQLEndTran,
    SQLExecDirect, SQLExecute, SQLFetch, SQLFreeHandle, SQLFreeStmt, SQLGetConnectAttr,
    SQLGetData, SQLGetDataW, SQLGetDescField, SQLGetDiagRec, SQLGetFunctions, SQLGetInfo,
    SQLGetInfoW, SQLGetStmtAttr, SQLGetTypeInfo, SQLNativeSql, SQLNumResultCols, SQLPrepare,
    SQLPrimaryKeys, SQLRowCount, SQLSetConnectAttr, SQLSetDescField, SQLSetEnvAttr,
    SQLSetStmtAttr, SQLSpecialColumns, SQLStatistics, SQLTables,
};

#[cfg(feature = "mock-driver")]
pub use crate::mock::ffi::{
    SQLAllocHandle, SQLBindParameter, SQLCancel, SQLCloseCursor, SQLColAttribute,
    SQLColAttributeW, SQLColumns, SQLCopyDesc, SQLDisconnect, SQLDriverConnect, SQLEndTran,
    SQLExecDirect, SQLExecute, SQLFetch, SQLFreeHandle, SQLFreeStmt, SQLGetConnectAttr,
    SQLGetData, SQLGetDataW, SQLGetDescField, SQLGetDiagRec, SQLGetFunctions, SQLGetInfo,
    SQLGetInfoW, SQLGetStmtAttr, SQLGetTypeInfo, SQLNativeSql, SQLNumResultCols, SQLPrepare,
    SQLPrimaryKeys, SQLRowCount, SQLSetConnectAttr, SQLSetDescField, SQLSetEnvAttr,
    SQLSetStmtAttr, SQLSpecialColumns, SQLStatistics, SQLTables,
};
