//! `verity config set <first> <second>` and `verity config show`

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Subcommand};

use verity_core::{
    config::{self, ConfigFile},
    error::ConfigError,
    types::RootPair,
};

/// Manage the saved root pair.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Save the default root pair for future `verity check` runs.
    Set(SetArgs),

    /// Print the saved root pair.
    Show,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Absolute path to the first tree root.
    pub first_root: PathBuf,

    /// Absolute path to the second tree root.
    pub second_root: PathBuf,
}

pub fn run(cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Set(args) => set(args),
        ConfigCommand::Show => show(),
    }
}

fn set(args: SetArgs) -> Result<()> {
    let file = ConfigFile {
        roots: RootPair {
            first_root: args.first_root,
            second_root: args.second_root,
        },
        saved_at: Utc::now(),
    };
    config::save(&file).context("failed to save configuration")?;
    println!("✓ Saved roots to ~/.verity/config.yaml");
    println!("  first:  {}", file.roots.first_root.display());
    println!("  second: {}", file.roots.second_root.display());
    Ok(())
}

fn show() -> Result<()> {
    match config::load() {
        Ok(file) => {
            println!("first:  {}", file.roots.first_root.display());
            println!("second: {}", file.roots.second_root.display());
            println!("saved:  {}", file.saved_at.to_rfc3339());
            Ok(())
        }
        Err(ConfigError::ConfigNotFound { .. }) => {
            println!("No saved configuration.");
            println!("Run: verity config set <first> <second>");
            Ok(())
        }
        Err(err) => Err(err).context("failed to load configuration"),
    }
}
