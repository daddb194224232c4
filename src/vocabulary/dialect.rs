// SPDX-License-Identifier: MIT

//! Multi-dialect SQL fallback: probes that need a real round trip against
//! an arbitrary DBMS can't hardcode one vendor's syntax, so they offer an
//! ordered list of equivalent statements and the first one the driver
//! accepts wins.

use crate::error::OdbcError;
use crate::handles::Statement;

/// Tries each statement in `dialects` against `stmt` in order via
/// `execute`, returning the first one that succeeds along with its index.
/// If every dialect fails, returns the last error — the most likely to be
/// actionable, since earlier failures are often just "wrong dialect" noise.
pub fn execute_first_that_succeeds<'a>(
    stmt: &Statement,
    dialects: &'a [&'a str],
) -> Result<(usize, &'a str), OdbcError> {
    let mut last_err = None;
    for (idx, sql) in dialects.iter().enumerate() {
        match stmt.execute(sql) {
            Ok(()) => return Ok((idx, sql)),
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err.unwrap_or(OdbcError::NotConnected))
}

#[cfg(all(test, feature = "mock-driver"))]
mod tests {
    use super::*;
    use crate::handles::{Connection, Environment};
    use crate::mock;

    #[test]
    fn first_working_dialect_wins() {
        mock::reset();
        let env = Environment::new().unwrap();
        let mut conn = Connection::new(&env).unwrap();
        conn.connect("Driver={Mock ODBC Driver};Mode=Success;").unwrap();
        let stmt = Statement::new(&conn).unwrap();

        let dialects = ["THIS IS NOT VALID SQL !!! @#$%", "SELECT 1"];
        let (idx, sql) = execute_first_that_succeeds(&stmt, &dialects).unwrap();
        assert_eq!(idx, 1);
        assert_eq!(sql, "SELECT 1");
    }

    #[test]
    fn every_dialect_failing_surfaces_the_last_error() {
        mock::reset();
        let env = Environment::new().unwrap();
        let mut conn = Connection::new(&env).unwrap();
        conn.connect("Driver={Mock ODBC Driver};Mode=Success;").unwrap();
        let stmt = Statement::new(&conn).unwrap();

        let dialects = ["THIS IS NOT VALID SQL !!! @#$%"];
        assert!(execute_first_that_succeeds(&stmt, &dialects).is_err());
    }
}
