// SPDX-License-Identifier: MIT

use crate::driver;
use crate::error::{check_result, OdbcError};
use crate::handles::Environment;
use crate::sys::{self, SQLHDBC};
use tracing::{debug, warn};

/// RAII wrapper for the CLI connection handle. Constructed from an
/// [`Environment`] by reference; starts disconnected.
pub struct Connection<'env> {
    handle: SQLHDBC,
    env: &'env Environment,
    connected: bool,
}

impl<'env> Connection<'env> {
    pub fn new(env: &'env Environment) -> Result<Self, OdbcError> {
        let mut handle: SQLHDBC = sys::SQL_NULL_HANDLE;
        let rc =
            unsafe { driver::SQLAllocHandle(sys::SQL_HANDLE_DBC, env.handle(), &mut handle) };
        if !sys::sql_succeeded(rc) || handle.is_null() {
            return Err(OdbcError::HandleAlloc("connection"));
        }
        Ok(Connection {
            handle,
            env,
            connected: false,
        })
    }

    pub fn handle(&self) -> SQLHDBC {
        self.handle
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn environment(&self) -> &Environment {
        self.env
    }

    /// Connect using the driver's prompt-less connect entry point. The
    /// connection string is passed through verbatim; the core never
    /// parses or sanitizes it. Double-connect is a contract violation.
    pub fn connect(&mut self, connection_string: &str) -> Result<(), OdbcError> {
        if self.connected {
            return Err(OdbcError::AlreadyConnected);
        }

        let in_str = connection_string.as_bytes();
        let mut out_buf = [0u8; 1024];
        let mut out_len: sys::SQLSMALLINT = 0;

        let rc = unsafe {
            driver::SQLDriverConnect(
                self.handle,
                sys::SQL_NULL_HANDLE,
                in_str.as_ptr(),
                in_str.len() as sys::SQLSMALLINT,
                out_buf.as_mut_ptr(),
                out_buf.len() as sys::SQLSMALLINT,
                &mut out_len,
                sys::SQL_DRIVER_NOPROMPT,
            )
        };

        check_result(rc, sys::SQL_HANDLE_DBC, self.handle, "SQLDriverConnect")?;
        self.connected = true;
        debug!("connected");
        Ok(())
    }

    pub fn disconnect(&mut self) -> Result<(), OdbcError> {
        if !self.connected {
            return Err(OdbcError::NotConnected);
        }
        let rc = unsafe { driver::SQLDisconnect(self.handle) };
        check_result(rc, sys::SQL_HANDLE_DBC, self.handle, "SQLDisconnect")?;
        self.connected = false;
        Ok(())
    }

    /// Current autocommit state, used by the temp-schema lifecycle to save
    /// and restore it around DDL.
    pub fn autocommit(&self) -> Result<bool, OdbcError> {
        let mut value: sys::SQLUINTEGER = 0;
        let mut out_len: sys::SQLINTEGER = 0;
        let rc = unsafe {
            driver::SQLGetConnectAttr(
                self.handle,
                sys::SQL_ATTR_AUTOCOMMIT,
                &mut value as *mut _ as sys::SQLPOINTER,
                std::mem::size_of::<sys::SQLUINTEGER>() as sys::SQLINTEGER,
                &mut out_len,
            )
        };
        check_result(rc, sys::SQL_HANDLE_DBC, self.handle, "SQLGetConnectAttr(AUTOCOMMIT)")?;
        Ok(value == sys::SQL_AUTOCOMMIT_ON)
    }

    pub fn set_autocommit(&self, on: bool) -> Result<(), OdbcError> {
        let value = if on {
            sys::SQL_AUTOCOMMIT_ON
        } else {
            sys::SQL_AUTOCOMMIT_OFF
        };
        let rc = unsafe {
            driver::SQLSetConnectAttr(
                self.handle,
                sys::SQL_ATTR_AUTOCOMMIT,
                value as sys::SQLPOINTER,
                0,
            )
        };
        check_result(rc, sys::SQL_HANDLE_DBC, self.handle, "SQLSetConnectAttr(AUTOCOMMIT)")
    }

    pub fn commit(&self) -> Result<(), OdbcError> {
        let rc = unsafe { driver::SQLEndTran(sys::SQL_HANDLE_DBC, self.handle, sys::SQL_COMMIT) };
        check_result(rc, sys::SQL_HANDLE_DBC, self.handle, "SQLEndTran(COMMIT)")
    }

    pub fn rollback(&self) -> Result<(), OdbcError> {
        let rc = unsafe { driver::SQLEndTran(sys::SQL_HANDLE_DBC, self.handle, sys::SQL_ROLLBACK) };
        check_result(rc, sys::SQL_HANDLE_DBC, self.handle, "SQLEndTran(ROLLBACK)")
    }
}

impl<'env> Drop for Connection<'env> {
    fn drop(&mut self) {
        if self.connected {
            let rc = unsafe { driver::SQLDisconnect(self.handle) };
            if !sys::sql_succeeded(rc) {
                warn!("SQLDisconnect failed during drop; swallowing per cleanup contract");
            }
        }
        if !self.handle.is_null() {
            unsafe {
                driver::SQLFreeHandle(sys::SQL_HANDLE_DBC, self.handle);
            }
        }
    }
}
