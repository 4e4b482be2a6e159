//! Command-line definition for the `renta` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "renta",
    version,
    about = "Batch business-intelligence reports over a DVD-rental dataset"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the available report names.
    List,

    /// Compute one or more reports against a dataset and publish them.
    Run {
        /// Report names to run (see `renta list`).
        #[arg(required_unless_present = "all")]
        reports: Vec<String>,

        /// Run every report.
        #[arg(long, conflicts_with = "reports")]
        all: bool,

        /// Path to the JSON dataset file.
        #[arg(long, value_name = "FILE")]
        data: PathBuf,

        /// Materialize each table as `<DIR>/<report>.json`. When omitted,
        /// a single JSON envelope is printed to stdout instead.
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Pretty-print JSON output.
        #[arg(long)]
        pretty: bool,
    },
}
