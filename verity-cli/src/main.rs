//! Verity — backup integrity verification CLI.
//!
//! # Usage
//!
//! ```text
//! verity check <first> <second> [--report-dir <dir>] [--json] [--quiet]
//! verity check                  (roots from ~/.verity/config.yaml)
//! verity config set <first> <second>
//! verity config show
//! ```
//!
//! `check` exits 0 on a clean run; when discrepancies exist it exits with
//! the raw status code (2–30), so scripts can divisibility-test the exit
//! code without parsing the report.

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{check::CheckArgs, config::ConfigCommand};

#[derive(Parser, Debug)]
#[command(
    name = "verity",
    version,
    about = "Verify the integrity of two copies of a file tree",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare two directory trees and write an integrity report.
    Check(CheckArgs),

    /// Manage the saved root pair used when `check` is run without paths.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Check(args) => args.run(),
        Commands::Config { command } => {
            commands::config::run(command)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
