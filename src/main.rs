// SPDX-License-Identifier: MIT

//! `odbc-crusher`: CLI front matter (spec §6).
//!
//! Thin wrapper over the library: parse args, allocate the handle chain,
//! collect capabilities, run the probe catalog, hand results to the
//! selected sink, then translate the outcome into spec.md §6's exit
//! codes. All probe logic lives in the library; this file is plumbing.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, OutputArg};
use odbc_crusher::capability::CapabilitySnapshot;
use odbc_crusher::handles::{Connection, Environment};
use odbc_crusher::harness::{run_categories, Category};
use odbc_crusher::probes::all_categories;
use odbc_crusher::sinks::{console::ConsoleSink, json::JsonSink, Sink};
use odbc_crusher::OdbcError;
use std::fs::File;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Exit codes per spec.md §6.
const EXIT_OK: i32 = 0;
const EXIT_PROBE_FAILURE: i32 = 1;
const EXIT_DRIVER_ERROR: i32 = 2;
const EXIT_HOST_FAILURE: i32 = 3;

/// Distinguishes the two pre-probe failure classes spec.md §6 assigns
/// different exit codes to, so `main` doesn't have to re-derive it from
/// an `anyhow::Error`'s message.
enum CliError {
    Driver(OdbcError),
    Host(anyhow::Error),
}

impl From<OdbcError> for CliError {
    fn from(e: OdbcError) -> Self {
        CliError::Driver(e)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(e: anyhow::Error) -> Self {
        CliError::Host(e)
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(&cli) {
        Ok(code) => code,
        Err(CliError::Driver(e)) => {
            tracing::error!(error = %e, "driver-level failure before probes could start");
            eprintln!("odbc-crusher: {e}");
            EXIT_DRIVER_ERROR
        }
        Err(CliError::Host(e)) => {
            eprintln!("odbc-crusher: {e:#}");
            EXIT_HOST_FAILURE
        }
    };
    std::process::exit(code);
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("odbc_crusher=info"),
        1 => EnvFilter::new("odbc_crusher=debug"),
        _ => EnvFilter::new("odbc_crusher=trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or(filter))
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Runs the probe harness end to end. The `i32` is the exit code the
/// run itself decided on (0 or 1, per whether any probe failed or
/// errored); an `Err` means setup failed before any probe could run,
/// which carries its own exit code (2 or 3) via [`CliError`].
fn run(cli: &Cli) -> Result<i32, CliError> {
    let env = Environment::new()?;
    let mut conn = Connection::new(&env)?;
    conn.connect(&cli.connection_string)?;

    tracing::info!(connection_string = %cli.connection_string, "connected, collecting capabilities");
    let capabilities = CapabilitySnapshot::collect(&conn);
    let categories = all_categories();

    let exit_code = match cli.output {
        OutputArg::Console => {
            let mut sink = make_sink(cli, |w| ConsoleSink::new(w, cli.verbose > 0))?;
            dispatch(&conn, &cli.connection_string, &capabilities, &categories, &mut sink)
        }
        OutputArg::Json => {
            let mut sink = make_sink(cli, |w| JsonSink::new(w, true))?;
            dispatch(&conn, &cli.connection_string, &capabilities, &categories, &mut sink)
        }
    };

    let _ = conn.disconnect();
    Ok(exit_code)
}

/// Builds a sink writing to either the `--file` path or stdout, via a
/// factory so the two output formats share the open-or-stdout plumbing.
fn make_sink<S: Sink>(cli: &Cli, build: impl FnOnce(Box<dyn Write>) -> S) -> Result<S, CliError> {
    let writer: Box<dyn Write> = match &cli.file {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    Ok(build(writer))
}

fn dispatch(
    conn: &Connection,
    connection_string: &str,
    capabilities: &CapabilitySnapshot,
    categories: &[Box<dyn Category>],
    sink: &mut impl Sink,
) -> i32 {
    sink.start(connection_string, capabilities);
    let summary = run_categories(conn, connection_string, capabilities, categories, |report| {
        sink.report_category(report);
    });
    sink.finish(&summary);

    if summary.highest_severity_failure.is_some() {
        EXIT_PROBE_FAILURE
    } else {
        EXIT_OK
    }
}
