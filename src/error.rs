// SPDX-License-Identifier: MIT

//! Diagnostic extraction and the crate's typed error.
//!
//! Mirrors `odbc_crusher::core::OdbcError` / `check_odbc_result` from the
//! mock-driver reference implementation: pull every diagnostic record off a
//! handle in ascending order, then wrap them in one error value.

use crate::sys::{self, SQLHANDLE, SQLSMALLINT};
use serde::Serialize;
use std::ffi::CStr;
use thiserror::Error;

/// A single diagnostic record pulled from `SQLGetDiagRec`.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticRecord {
    pub sqlstate: String,
    pub native_error: i32,
    pub message: String,
    pub record_number: i16,
}

/// The crate's error type. Carries every diagnostic record the driver
/// reported for the call that failed, plus a short human description of
/// what we were doing when it failed.
#[derive(Debug, Error)]
pub enum OdbcError {
    #[error("{context}")]
    Driver {
        context: String,
        diagnostics: Vec<DiagnosticRecord>,
    },
    #[error("failed to allocate {0} handle")]
    HandleAlloc(&'static str),
    #[error("connection is already connected")]
    AlreadyConnected,
    #[error("connection is not connected")]
    NotConnected,
    #[error("driver crashed during {context}: {description}")]
    Crashed { context: String, description: String },
}

impl OdbcError {
    /// The diagnostic records carried by this error, if any.
    pub fn diagnostics(&self) -> &[DiagnosticRecord] {
        match self {
            OdbcError::Driver { diagnostics, .. } => diagnostics,
            _ => &[],
        }
    }

    /// Render every diagnostic record as the multi-line text the console
    /// sink and `TestResult.diagnostic` field expect.
    pub fn format_diagnostics(&self) -> String {
        format_diagnostics(self.diagnostics())
    }

    /// The SQLSTATE of the first diagnostic record, if one was reported.
    pub fn primary_sqlstate(&self) -> Option<&str> {
        self.diagnostics().first().map(|d| d.sqlstate.as_str())
    }
}

fn format_diagnostics(diagnostics: &[DiagnosticRecord]) -> String {
    if diagnostics.is_empty() {
        return "(no diagnostic records)".to_string();
    }
    diagnostics
        .iter()
        .map(|d| {
            format!(
                "[{}] (Native: {}) {}",
                d.sqlstate, d.native_error, d.message
            )
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Pull every diagnostic record off `handle` in ascending record-index
/// order, stopping the first time the driver signals end-of-records.
///
/// The loop deliberately treats *any* non-success return from
/// `SQLGetDiagRec` as end-of-records, not just `SQL_NO_DATA`: some drivers
/// return `SQL_ERROR` once the record index runs past the end instead of
/// the documented `SQL_NO_DATA`.
pub fn extract(handle_type: SQLSMALLINT, handle: SQLHANDLE, context: &str) -> OdbcError {
    let mut diagnostics = Vec::new();
    let mut record_number: SQLSMALLINT = 1;

    loop {
        let mut sqlstate = [0u8; 6];
        let mut native_error: sys::SQLINTEGER = 0;
        let mut message = [0u8; sys::SQL_MAX_MESSAGE_LENGTH];
        let mut text_length: SQLSMALLINT = 0;

        let rc = unsafe {
            crate::driver::SQLGetDiagRec(
                handle_type,
                handle,
                record_number,
                sqlstate.as_mut_ptr(),
                &mut native_error,
                message.as_mut_ptr(),
                message.len() as SQLSMALLINT,
                &mut text_length,
            )
        };

        if !sys::sql_succeeded(rc) {
            break;
        }

        let sqlstate = cstr_bytes_to_string(&sqlstate);
        let message = cstr_bytes_to_string(&message);

        diagnostics.push(DiagnosticRecord {
            sqlstate,
            native_error: native_error as i32,
            message,
            record_number,
        });

        record_number += 1;
    }

    OdbcError::Driver {
        context: if context.is_empty() {
            "ODBC error".to_string()
        } else {
            context.to_string()
        },
        diagnostics,
    }
}

fn cstr_bytes_to_string(buf: &[u8]) -> String {
    CStr::from_bytes_until_nul(buf)
        .map(|c| c.to_string_lossy().into_owned())
        .unwrap_or_else(|_| String::from_utf8_lossy(buf).into_owned())
}

/// If `rc` is not in the success set `{SQL_SUCCESS, SQL_SUCCESS_WITH_INFO}`,
/// extract diagnostics and return them as an error.
pub fn check_result(
    rc: sys::SQLRETURN,
    handle_type: SQLSMALLINT,
    handle: SQLHANDLE,
    context: &str,
) -> Result<(), OdbcError> {
    if sys::sql_succeeded(rc) {
        Ok(())
    } else {
        Err(extract(handle_type, handle, context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_diagnostics_empty() {
        assert_eq!(format_diagnostics(&[]), "(no diagnostic records)");
    }

    #[test]
    fn format_diagnostics_joins_records() {
        let d = vec![DiagnosticRecord {
            sqlstate: "42000".into(),
            native_error: 7,
            message: "syntax error".into(),
            record_number: 1,
        }];
        assert_eq!(
            format_diagnostics(&d),
            "[42000] (Native: 7) syntax error"
        );
    }

    #[test]
    fn cstr_bytes_to_string_stops_at_nul() {
        let mut buf = [0u8; 6];
        buf[..5].copy_from_slice(b"42000");
        assert_eq!(cstr_bytes_to_string(&buf), "42000");
    }
}
