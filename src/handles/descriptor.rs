// SPDX-License-Identifier: MIT

use crate::driver;
use crate::error::{check_result, OdbcError};
use crate::handles::Connection;
use crate::sys::{self, SQLHDESC};

/// The four descriptor roles a statement carries (spec §3): two
/// application-owned (APD/ARD), two driver-owned (IPD/IRD). Only the
/// application-owned pair may be explicitly allocated and swapped onto a
/// statement; the driver-owned pair always belongs to whichever statement
/// implicitly allocated them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorRole {
    ApplicationRow,
    ApplicationParam,
    ImplementationRow,
    ImplementationParam,
}

/// RAII wrapper for an explicitly-allocated CLI descriptor handle.
///
/// The harness never allocates implementation descriptors itself — those
/// are always owned by a [`crate::handles::Statement`] and reached
/// indirectly through its attributes. This type exists for probes that
/// need to allocate an explicit application descriptor and bind it onto a
/// statement via `SQLSetStmtAttr`, per spec §4.8's descriptor probe
/// category.
pub struct Descriptor<'conn> {
    handle: SQLHDESC,
    role: DescriptorRole,
    conn: &'conn Connection<'conn>,
}

impl<'conn> Descriptor<'conn> {
    /// Explicitly allocate an application descriptor against `conn`. Only
    /// `ApplicationRow`/`ApplicationParam` are meaningful here; the
    /// driver-owned roles cannot be allocated by the application and exist
    /// only to label descriptors discovered via a statement's attributes.
    pub fn new(conn: &'conn Connection<'conn>, role: DescriptorRole) -> Result<Self, OdbcError> {
        let mut handle: SQLHDESC = sys::SQL_NULL_HANDLE;
        let rc =
            unsafe { driver::SQLAllocHandle(sys::SQL_HANDLE_DESC, conn.handle(), &mut handle) };
        if !sys::sql_succeeded(rc) || handle.is_null() {
            return Err(OdbcError::HandleAlloc("descriptor"));
        }
        Ok(Descriptor { handle, role, conn })
    }

    pub fn handle(&self) -> SQLHDESC {
        self.handle
    }

    pub fn role(&self) -> DescriptorRole {
        self.role
    }

    pub fn connection(&self) -> &Connection<'conn> {
        self.conn
    }

    /// Sets the `SQL_DESC_TYPE` field of record 1 (spec §4.8's descriptor
    /// field access probe).
    pub fn set_type_field(&self, sql_type: i16) -> Result<(), OdbcError> {
        let rc = unsafe {
            driver::SQLSetDescField(
                self.handle,
                1,
                sys::SQL_DESC_TYPE,
                sql_type as isize as sys::SQLPOINTER,
                0,
            )
        };
        check_result(rc, sys::SQL_HANDLE_DESC, self.handle, "SQLSetDescField")
    }

    /// Reads the `SQL_DESC_TYPE` field of record 1 back.
    pub fn type_field(&self) -> Result<i16, OdbcError> {
        let mut value: sys::SQLINTEGER = 0;
        let rc = unsafe {
            driver::SQLGetDescField(
                self.handle,
                1,
                sys::SQL_DESC_TYPE,
                &mut value as *mut sys::SQLINTEGER as sys::SQLPOINTER,
                std::mem::size_of::<sys::SQLINTEGER>() as sys::SQLINTEGER,
                std::ptr::null_mut(),
            )
        };
        check_result(rc, sys::SQL_HANDLE_DESC, self.handle, "SQLGetDescField")?;
        Ok(value as i16)
    }

    /// Copies every descriptor field from `source` onto `self` via
    /// `SQLCopyDesc`.
    pub fn copy_from(&self, source: &Descriptor<'conn>) -> Result<(), OdbcError> {
        let rc = unsafe { driver::SQLCopyDesc(source.handle, self.handle) };
        check_result(rc, sys::SQL_HANDLE_DESC, self.handle, "SQLCopyDesc")
    }
}

impl<'conn> Drop for Descriptor<'conn> {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe {
                driver::SQLFreeHandle(sys::SQL_HANDLE_DESC, self.handle);
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
    fn allocates_and_frees_an_application_descriptor() {
        mock::reset();
        let env = Environment::new().unwrap();
        let mut conn = Connection::new(&env).unwrap();
        conn.connect("Driver={Mock ODBC Driver};Mode=Success;").unwrap();

        let desc = Descriptor::new(&conn, DescriptorRole::ApplicationParam).unwrap();
        assert_eq!(desc.role(), DescriptorRole::ApplicationParam);
        assert!(!desc.handle().is_null());
    }
}
