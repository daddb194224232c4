// SPDX-License-Identifier: MIT

//! Command-line surface (spec §6).

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "odbc-crusher")]
#[command(author = "naskel.com")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Driver-conformance probe for the ODBC (Call-Level Interface) standard")]
#[command(long_about = None)]
pub struct Cli {
    /// Driver connection string, passed verbatim to the driver's
    /// prompt-less connect entry point. Never parsed or sanitized.
    pub connection_string: String,

    /// Increase log verbosity. Repeatable: `-v` is info-level internals,
    /// `-vv` debug, `-vvv` trace.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Report format.
    #[arg(short, long, value_enum, default_value = "console")]
    pub output: OutputArg,

    /// Write the report to this path instead of stdout.
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputArg {
    Console,
    Json,
}
