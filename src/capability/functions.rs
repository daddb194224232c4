// SPDX-License-Identifier: MIT

//! Function support sub-collector (spec §4.6, third bullet).
//!
//! Reports per-function support for a curated list spanning connection,
//! statement, catalog, retrieval, transaction, diagnostic, attribute,
//! handle, info, cursor, and descriptor functions.

use crate::driver;
use crate::handles::Connection;
use crate::sys;
use serde::Serialize;

/// Curated list of CLI function names probed for support, one per
/// functional cluster named in spec §4.6.
const CURATED_FUNCTIONS: &[&str] = &[
    // connection
    "SQLConnect",
    "SQLDriverConnect",
    "SQLDisconnect",
    // statement
    "SQLExecDirect",
    "SQLPrepare",
    "SQLExecute",
    "SQLFetch",
    // catalog
    "SQLTables",
    "SQLColumns",
    "SQLPrimaryKeys",
    "SQLStatistics",
    // retrieval
    "SQLGetData",
    "SQLBindCol",
    // transaction
    "SQLEndTran",
    "SQLSetConnectAttr",
    // diagnostic
    "SQLGetDiagRec",
    "SQLGetDiagField",
    // attribute
    "SQLSetStmtAttr",
    "SQLGetStmtAttr",
    // handle
    "SQLAllocHandle",
    "SQLFreeHandle",
    // info
    "SQLGetInfo",
    "SQLGetFunctions",
    // cursor
    "SQLFetchScroll",
    "SQLCloseCursor",
    // descriptor
    "SQLGetDescField",
    "SQLSetDescField",
];

#[derive(Debug, Clone, Default, Serialize)]
pub struct FunctionSupport {
    pub supported: Vec<String>,
    pub unsupported: Vec<String>,
}

pub(super) fn collect_functions(conn: &Connection) -> FunctionSupport {
    let mut support = FunctionSupport::default();
    for (idx, name) in CURATED_FUNCTIONS.iter().enumerate() {
        let mut flag: sys::SQLUSMALLINT = 0;
        let rc = unsafe { driver::SQLGetFunctions(conn.handle(), idx as sys::SQLUSMALLINT, &mut flag) };
        if sys::sql_succeeded(rc) && flag != 0 {
            support.supported.push((*name).to_string());
        } else {
            support.unsupported.push((*name).to_string());
        }
    }
    support
}

#[cfg(all(test, feature = "mock-driver"))]
mod tests {
    use super::*;
    use crate::handles::Environment;
    use crate::mock;

    #[test]
    fn generous_mock_driver_supports_everything_probed() {
        mock::reset();
        let env = Environment::new().unwrap();
        let mut conn = Connection::new(&env).unwrap();
        conn.connect("Driver={Mock ODBC Driver};Mode=Success;").unwrap();

        let support = collect_functions(&conn);
        assert_eq!(support.supported.len(), CURATED_FUNCTIONS.len());
        assert!(support.unsupported.is_empty());
    }
}
