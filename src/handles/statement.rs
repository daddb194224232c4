// SPDX-License-Identifier: MIT

use crate::driver;
use crate::error::{check_result, OdbcError};
use crate::handles::{Connection, Descriptor};
use crate::sys::{self, SQLHSTMT};

/// RAII wrapper for the CLI statement handle. Non-movable, non-copyable:
/// it borrows its parent connection for its whole lifetime.
pub struct Statement<'conn> {
    handle: SQLHSTMT,
    conn: &'conn Connection<'conn>,
}

impl<'conn> Statement<'conn> {
    pub fn new(conn: &'conn Connection<'conn>) -> Result<Self, OdbcError> {
        let mut handle: SQLHSTMT = sys::SQL_NULL_HANDLE;
        let rc =
            unsafe { driver::SQLAllocHandle(sys::SQL_HANDLE_STMT, conn.handle(), &mut handle) };
        if !sys::sql_succeeded(rc) || handle.is_null() {
            return Err(OdbcError::HandleAlloc("statement"));
        }
        Ok(Statement { handle, conn })
    }

    pub fn handle(&self) -> SQLHSTMT {
        self.handle
    }

    pub fn connection(&self) -> &Connection<'conn> {
        self.conn
    }

    /// The recycle protocol (spec §4.3): free-statement with `SQL_CLOSE`
    /// (silently succeeds with no open cursor, unlike `SQLCloseCursor`)
    /// then `SQL_RESET_PARAMS`. Infallible by design — recycle normalizes
    /// state, it does not diagnose, so both return codes are discarded.
    /// Idempotent: calling it twice in a row has the same observable
    /// effect as calling it once.
    pub fn recycle(&self) {
        unsafe {
            let _ = driver::SQLFreeStmt(self.handle, sys::SQL_CLOSE);
            let _ = driver::SQLFreeStmt(self.handle, sys::SQL_RESET_PARAMS);
        }
    }

    /// Close-cursor-only variant used by `execute_prepared`: rebinding
    /// parameters between re-executions of a prepared statement must stay
    /// optional, so this must not reset them.
    fn close_cursor_only(&self) {
        unsafe {
            let _ = driver::SQLFreeStmt(self.handle, sys::SQL_CLOSE);
        }
    }

    pub fn execute(&self, sql: &str) -> Result<(), OdbcError> {
        self.recycle();
        let bytes = sql.as_bytes();
        let rc = unsafe {
            driver::SQLExecDirect(self.handle, bytes.as_ptr(), bytes.len() as sys::SQLINTEGER)
        };
        check_result(rc, sys::SQL_HANDLE_STMT, self.handle, "SQLExecDirect")
    }

    pub fn prepare(&self, sql: &str) -> Result<(), OdbcError> {
        self.recycle();
        let bytes = sql.as_bytes();
        let rc = unsafe {
            driver::SQLPrepare(self.handle, bytes.as_ptr(), bytes.len() as sys::SQLINTEGER)
        };
        check_result(rc, sys::SQL_HANDLE_STMT, self.handle, "SQLPrepare")
    }

    pub fn execute_prepared(&self) -> Result<(), OdbcError> {
        self.close_cursor_only();
        let rc = unsafe { driver::SQLExecute(self.handle) };
        check_result(rc, sys::SQL_HANDLE_STMT, self.handle, "SQLExecute")
    }

    /// Returns `true` if a row was fetched, `false` on end-of-data.
    /// End-of-data is the distinguished `SQL_NO_DATA` return and must not
    /// be treated as an error.
    pub fn fetch(&self) -> Result<bool, OdbcError> {
        let rc = unsafe { driver::SQLFetch(self.handle) };
        if rc == sys::SQL_NO_DATA {
            return Ok(false);
        }
        check_result(rc, sys::SQL_HANDLE_STMT, self.handle, "SQLFetch")?;
        Ok(true)
    }

    pub fn close_cursor(&self) -> Result<(), OdbcError> {
        let rc = unsafe { driver::SQLCloseCursor(self.handle) };
        check_result(rc, sys::SQL_HANDLE_STMT, self.handle, "SQLCloseCursor")
    }

    pub fn cancel(&self) -> Result<(), OdbcError> {
        let rc = unsafe { driver::SQLCancel(self.handle) };
        check_result(rc, sys::SQL_HANDLE_STMT, self.handle, "SQLCancel")
    }

    pub fn row_count(&self) -> Result<i64, OdbcError> {
        let mut count: sys::SQLLEN = 0;
        let rc = unsafe { driver::SQLRowCount(self.handle, &mut count) };
        check_result(rc, sys::SQL_HANDLE_STMT, self.handle, "SQLRowCount")?;
        Ok(count as i64)
    }

    pub fn num_result_cols(&self) -> Result<i16, OdbcError> {
        let mut count: sys::SQLSMALLINT = 0;
        let rc = unsafe { driver::SQLNumResultCols(self.handle, &mut count) };
        check_result(rc, sys::SQL_HANDLE_STMT, self.handle, "SQLNumResultCols")?;
        Ok(count)
    }

    /// Sets a `usize`-valued statement attribute (the CLI passes these by
    /// value through the `SQLPOINTER` slot rather than by reference).
    fn set_stmt_attr_usize(&self, attribute: sys::SQLINTEGER, value: usize) -> Result<(), OdbcError> {
        let rc = unsafe {
            driver::SQLSetStmtAttr(self.handle, attribute, value as sys::SQLPOINTER, 0)
        };
        check_result(rc, sys::SQL_HANDLE_STMT, self.handle, "SQLSetStmtAttr")
    }

    fn get_stmt_attr_usize(&self, attribute: sys::SQLINTEGER) -> Result<usize, OdbcError> {
        let mut value: sys::SQLULEN = 0;
        let rc = unsafe {
            driver::SQLGetStmtAttr(
                self.handle,
                attribute,
                &mut value as *mut sys::SQLULEN as sys::SQLPOINTER,
                std::mem::size_of::<sys::SQLULEN>() as sys::SQLINTEGER,
                std::ptr::null_mut(),
            )
        };
        check_result(rc, sys::SQL_HANDLE_STMT, self.handle, "SQLGetStmtAttr")?;
        Ok(value as usize)
    }

    /// `SQL_ATTR_PARAMSET_SIZE` (spec §4.8's array-parameter category):
    /// binding more than one parameter set is a Level 2 feature, so a
    /// driver without it is expected to fail this with `HY092`.
    pub fn set_paramset_size(&self, size: usize) -> Result<(), OdbcError> {
        self.set_stmt_attr_usize(sys::SQL_ATTR_PARAMSET_SIZE, size)
    }

    pub fn set_cursor_type(&self, cursor_type: sys::SQLULEN) -> Result<(), OdbcError> {
        self.set_stmt_attr_usize(sys::SQL_ATTR_CURSOR_TYPE, cursor_type as usize)
    }

    pub fn cursor_type(&self) -> Result<sys::SQLULEN, OdbcError> {
        Ok(self.get_stmt_attr_usize(sys::SQL_ATTR_CURSOR_TYPE)? as sys::SQLULEN)
    }

    /// Binds the out-parameter the driver writes `SQL_ATTR_PARAMSET_SIZE`-many
    /// rows processed into after `SQLExecute`/`SQLExecDirect`.
    pub fn set_params_processed_ptr(&self, count: &mut sys::SQLULEN) -> Result<(), OdbcError> {
        self.set_stmt_attr_usize(
            sys::SQL_ATTR_PARAMS_PROCESSED_PTR,
            count as *mut sys::SQLULEN as usize,
        )
    }

    /// Swaps an explicitly-allocated application parameter descriptor onto
    /// this statement (spec §4.8's descriptor-swap probe).
    pub fn set_app_param_desc(&self, desc: &Descriptor) -> Result<(), OdbcError> {
        self.set_stmt_attr_usize(sys::SQL_ATTR_APP_PARAM_DESC, desc.handle() as usize)
    }
}

impl<'conn> Drop for Statement<'conn> {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe {
                driver::SQLFreeHandle(sys::SQL_HANDLE_STMT, self.handle);
            }
        }
    }
}

#[cfg(all(test, feature = "mock-driver"))]
mod tests {
    use super::*;
    use crate::handles::Environment;
    use crate::mock;

    #[test]
    fn recycle_is_idempotent() {
        mock::reset();
        let env = Environment::new().unwrap();
        let mut conn = Connection::new(&env).unwrap();
        conn.connect("Driver={Mock ODBC Driver};Mode=Success;").unwrap();
        let stmt = Statement::new(&conn).unwrap();
        stmt.recycle();
        stmt.recycle();
        // Recycling twice must not itself error, and a subsequent execute
        // must still succeed normally.
        stmt.execute("SELECT 1").unwrap();
    }

    #[test]
    fn execute_prepared_does_not_reset_params() {
        mock::reset();
        let env = Environment::new().unwrap();
        let mut conn = Connection::new(&env).unwrap();
        conn.connect("Driver={Mock ODBC Driver};Mode=Success;").unwrap();
        let stmt = Statement::new(&conn).unwrap();
        stmt.prepare("SELECT 1").unwrap();
        let before = mock::reset_params_call_count(&stmt);
        stmt.execute_prepared().unwrap();
        assert_eq!(mock::reset_params_call_count(&stmt), before);
        stmt.execute_prepared().unwrap();
        assert_eq!(mock::reset_params_call_count(&stmt), before);
    }
}
