// SPDX-License-Identifier: MIT

//! Scratch-table lifecycle for probes that need to create, use, and drop a
//! throwaway table without leaving residue behind or disturbing the
//! connection's autocommit mode (spec §4.8's metadata/catalog-depth
//! probes run DDL; every other probe expects to find autocommit exactly
//! as it found it).

use crate::error::OdbcError;
use crate::handles::{Connection, Statement};

const TABLE_PREFIX: &str = "odbc_crusher_tmp";

/// Runs `body` with a freshly created, uniquely named temp table, restoring
/// the connection's original autocommit setting and dropping the table
/// afterward regardless of whether `body` succeeded. If `body` fails, the
/// transaction is rolled back before the table is dropped so a DBMS that
/// ties DDL to the active transaction doesn't leave a half-committed mess.
pub fn with_temp_table<T>(
    conn: &Connection,
    suffix: &str,
    body: impl FnOnce(&Statement, &str) -> Result<T, OdbcError>,
) -> Result<T, OdbcError> {
    let table_name = format!("{TABLE_PREFIX}_{suffix}");
    let saved_autocommit = conn.autocommit().unwrap_or(true);
    if saved_autocommit {
        let _ = conn.set_autocommit(false);
    }

    let stmt = Statement::new(conn)?;
    let create_result = stmt.execute(&format!("CREATE TABLE {table_name} (id INTEGER)"));

    let outcome = create_result.and_then(|()| body(&stmt, &table_name));

    if outcome.is_err() {
        let _ = conn.rollback();
    } else {
        let _ = conn.commit();
    }

    let drop_stmt = Statement::new(conn);
    if let Ok(drop_stmt) = drop_stmt {
        let _ = drop_stmt.execute(&format!("DROP TABLE {table_name}"));
        let _ = conn.commit();
    }

    if saved_autocommit {
        let _ = conn.set_autocommit(true);
    }

    outcome
}

#[cfg(all(test, feature = "mock-driver"))]
mod tests {
    use super::*;
    use crate::handles::Environment;
    use crate::mock;

    #[test]
    fn temp_table_is_created_and_dropped() {
        mock::reset();
        let env = Environment::new().unwrap();
        let mut conn = Connection::new(&env).unwrap();
        conn.connect("Driver={Mock ODBC Driver};Mode=Success;").unwrap();

        let seen_table = with_temp_table(&conn, "lifecycle", |_stmt, table_name| {
            Ok(mock::table_exists(table_name))
        })
        .unwrap();
        assert!(seen_table);

        assert!(!mock::table_exists(&format!("{TABLE_PREFIX}_lifecycle")));
    }

    #[test]
    fn autocommit_is_restored_after_the_temp_table_is_dropped() {
        mock::reset();
        let env = Environment::new().unwrap();
        let mut conn = Connection::new(&env).unwrap();
        conn.connect("Driver={Mock ODBC Driver};Mode=Success;").unwrap();
        conn.set_autocommit(true).unwrap();

        let _ = with_temp_table(&conn, "autocommit", |_stmt, _name| Ok(()));
        assert!(conn.autocommit().unwrap());
    }
}
