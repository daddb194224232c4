// SPDX-License-Identifier: MIT

use crate::error::{check_result, OdbcError};
use crate::sys::{self, SQLHENV};
use tracing::debug;

/// RAII wrapper for the CLI environment handle. Exactly one per process is
/// expected at the top of scope; movable (ownership transfer is the only
/// permitted "copy"), never `Clone`.
pub struct Environment {
    handle: SQLHENV,
}

impl Environment {
    /// Allocate an environment and set the protocol version to CLI 3.x.
    /// Both the allocation and the version-set are construction failures.
    pub fn new() -> Result<Self, OdbcError> {
        let mut handle: SQLHENV = sys::SQL_NULL_HANDLE;
        let rc = unsafe {
            crate::driver::SQLAllocHandle(sys::SQL_HANDLE_ENV, sys::SQL_NULL_HANDLE, &mut handle)
        };
        if !sys::sql_succeeded(rc) || handle.is_null() {
            return Err(OdbcError::HandleAlloc("environment"));
        }

        let rc = unsafe {
            crate::driver::SQLSetEnvAttr(
                handle,
                sys::SQL_ATTR_ODBC_VERSION,
                sys::SQL_OV_ODBC3 as sys::SQLPOINTER,
                0,
            )
        };
        if let Err(e) = check_result(rc, sys::SQL_HANDLE_ENV, handle, "SQLSetEnvAttr(ODBC_VERSION)")
        {
            unsafe { crate::driver::SQLFreeHandle(sys::SQL_HANDLE_ENV, handle) };
            return Err(e);
        }

        debug!("allocated CLI environment, protocol version set to 3.x");
        Ok(Environment { handle })
    }

    pub fn handle(&self) -> SQLHENV {
        self.handle
    }
}

impl Drop for Environment {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe {
                crate::driver::SQLFreeHandle(sys::SQL_HANDLE_ENV, self.handle);
            }
        }
    }
}

// Movable: ownership can transfer, but the handle is never duplicated.
unsafe impl Send for Environment {}
