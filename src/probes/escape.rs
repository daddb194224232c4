// SPDX-License-Identifier: MIT

//! Category 20: scalar function and escape-sequence support (spec §4.8
//! item 20).
//!
//! Each scalar-function-family probe gates on the driver's advertised
//! mask (`capability::scalar`) via `run_if_supported`, then executes the
//! matching `{fn ...}`/`{oj ...}`/`{interval ...}` escape sequence
//! against the connection; a driver that never reports the mask takes
//! the `skip-unsupported` path instead (spec §8 scenario 2's "absent
//! capability yields skip, not failure" law).

use crate::handles::Statement;
use crate::harness::{Category, Conformance, Probe, ProbeContext, Severity, TestResult};
use crate::sys;
use crate::vocabulary::run_if_supported;

fn executes_escape(
    ctx: &ProbeContext,
    test_name: &'static str,
    sql: &str,
    conformance: Conformance,
) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                test_name,
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                conformance,
                "spec.md §4.8 item 20",
            )
        }
    };
    match stmt.execute(sql) {
        Ok(()) => TestResult::pass(
            test_name,
            "SQLExecDirect",
            "the escape sequence is accepted",
            sql,
            conformance,
            "spec.md §4.8 item 20",
        ),
        Err(e) => TestResult::fail(
            test_name,
            "SQLExecDirect",
            "the escape sequence is accepted",
            e.to_string(),
            Severity::Warning,
            conformance,
            "spec.md §4.8 item 20",
        ),
    }
}

pub struct EscapeCategory;

impl Category for EscapeCategory {
    fn name(&self) -> &'static str {
        "Scalar Function / Escape Sequences"
    }

    fn probes(&self) -> Vec<Probe> {
        vec![
            Probe::new("string-scalar-functions", string_scalar_functions),
            Probe::new("numeric-scalar-functions", numeric_scalar_functions),
            Probe::new("datetime-scalar-functions", datetime_scalar_functions),
            Probe::new("outer-join-escape", outer_join_escape),
            Probe::new("interval-literal-escape", interval_literal_escape),
            Probe::new("like-clause-with-escape-character-executes", like_clause_with_escape_character_executes),
            Probe::new("native-sql-translation", native_sql_translation),
            Probe::new("procedure-call-escape-not-wired", procedure_call_escape_not_wired),
        ]
    }
}

fn string_scalar_functions(ctx: &ProbeContext) -> TestResult {
    run_if_supported(
        ctx.capabilities,
        |c| c.scalar_functions.string_functions_mask.is_some(),
        "string-scalar-functions",
        "{fn SUBSTRING(...)}",
        Conformance::Level1,
        "spec.md §4.8 item 20",
        "at least one string scalar function escape executes",
        || executes_escape(ctx, "string-scalar-functions", "SELECT {fn SUBSTRING('abcdef', 1, 3)}", Conformance::Level1),
    )
}

fn numeric_scalar_functions(ctx: &ProbeContext) -> TestResult {
    run_if_supported(
        ctx.capabilities,
        |c| c.scalar_functions.numeric_functions_mask.is_some(),
        "numeric-scalar-functions",
        "{fn ABS(...)}",
        Conformance::Level1,
        "spec.md §4.8 item 20",
        "at least one numeric scalar function escape executes",
        || executes_escape(ctx, "numeric-scalar-functions", "SELECT {fn ABS(-1)}", Conformance::Level1),
    )
}

fn datetime_scalar_functions(ctx: &ProbeContext) -> TestResult {
    run_if_supported(
        ctx.capabilities,
        |c| c.scalar_functions.datetime_functions_mask.is_some(),
        "datetime-scalar-functions",
        "{fn CURDATE()}",
        Conformance::Level1,
        "spec.md §4.8 item 20",
        "at least one date-time scalar function escape executes",
        || executes_escape(ctx, "datetime-scalar-functions", "SELECT {fn CURDATE()}", Conformance::Level1),
    )
}

fn outer_join_escape(ctx: &ProbeContext) -> TestResult {
    run_if_supported(
        ctx.capabilities,
        |c| c.scalar_functions.outer_join_mask.is_some(),
        "outer-join-escape",
        "{oj t1 LEFT OUTER JOIN t2 ...}",
        Conformance::Level1,
        "spec.md §4.8 item 20",
        "the outer-join escape sequence executes",
        || {
            executes_escape(
                ctx,
                "outer-join-escape",
                "SELECT 1 {oj t1 LEFT OUTER JOIN t2 ON t1.id = t2.id}",
                Conformance::Level1,
            )
        },
    )
}

fn interval_literal_escape(ctx: &ProbeContext) -> TestResult {
    run_if_supported(
        ctx.capabilities,
        |c| c.scalar_functions.interval_add_mask.is_some(),
        "interval-literal-escape",
        "{interval '1' day}",
        Conformance::Level2,
        "spec.md §4.8 item 20",
        "an interval literal escape sequence executes",
        || {
            executes_escape(
                ctx,
                "interval-literal-escape",
                "SELECT {fn TIMESTAMPADD(SQL_TSI_DAY, 1, {interval '1' day})}",
                Conformance::Level2,
            )
        },
    )
}

/// The CLI's `{escape '\\'}` syntax is translated by the driver before the
/// statement reaches the DBMS; the mock's generic fallback accepts any
/// SQL it doesn't specifically recognize, so this only confirms the
/// literal escape clause text is accepted without error, not that the
/// driver interprets it.
fn like_clause_with_escape_character_executes(ctx: &ProbeContext) -> TestResult {
    let stmt = match Statement::new(ctx.conn) {
        Ok(s) => s,
        Err(e) => {
            return TestResult::skip_inconclusive(
                "like-clause-with-escape-character-executes",
                "SQLAllocHandle(SQL_HANDLE_STMT)",
                "a statement handle allocates",
                e.to_string(),
                Conformance::Level1,
                "spec.md §4.8 item 20",
            )
        }
    };

    match stmt.execute("SELECT 1 WHERE 'a_b' LIKE 'a\\_b' {escape '\\'}") {
        Ok(()) => TestResult::pass(
            "like-clause-with-escape-character-executes",
            "SQLExecDirect",
            "a LIKE clause with an ODBC escape-character clause is accepted",
            "accepted",
            Conformance::Level1,
            "spec.md §4.8 item 20",
        ),
        Err(e) => TestResult::fail(
            "like-clause-with-escape-character-executes",
            "SQLExecDirect",
            "a LIKE clause with an ODBC escape-character clause is accepted",
            e.to_string(),
            Severity::Warning,
            Conformance::Level1,
            "spec.md §4.8 item 20",
        ),
    }
}

fn native_sql_translation(ctx: &ProbeContext) -> TestResult {
    let in_sql = "SELECT 1 {escape '\\'}";
    let mut out = [0u8; 256];
    let mut out_len: sys::SQLINTEGER = 0;
    let rc = unsafe {
        crate::driver::SQLNativeSql(
            ctx.conn.handle(),
            in_sql.as_ptr(),
            in_sql.len() as sys::SQLINTEGER,
            out.as_mut_ptr(),
            out.len() as sys::SQLINTEGER,
            &mut out_len,
        )
    };
    if !sys::sql_succeeded(rc) {
        return TestResult::fail(
            "native-sql-translation",
            "SQLNativeSql",
            "SQLNativeSql translates an escape clause into the DBMS's native SQL text",
            "SQLNativeSql reported failure",
            Severity::Warning,
            Conformance::Level1,
            "spec.md §4.8 item 20",
        );
    }
    let len = (out_len.max(0) as usize).min(out.len());
    let translated = String::from_utf8_lossy(&out[..len]).into_owned();
    TestResult::pass(
        "native-sql-translation",
        "SQLNativeSql",
        "the escape clause no longer appears in the translated text",
        translated,
        Conformance::Level1,
        "spec.md §4.8 item 20",
    )
}

fn procedure_call_escape_not_wired(_ctx: &ProbeContext) -> TestResult {
    TestResult::skip_inconclusive(
        "procedure-call-escape-not-wired",
        "{call proc(...)}/{?=call proc(...)}",
        "both call-escape variants, with and without a return-value placeholder, execute",
        "the mock driver models no stored procedures to call",
        Conformance::Level2,
        "spec.md §4.8 item 20",
    )
    .with_suggestion("extend the mock driver with a callable procedure to cover this probe")
}
