//! CLI for the forge scaffolding tool.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use forge_core::config;

use commands::run_new;

/// Top-level CLI for forge.
#[derive(Debug, Parser)]
#[command(name = "forge")]
#[command(about = "Forge: scaffold a new application from the latest platform release", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Create a new application in the given directory.
    New {
        /// Directory to scaffold, relative to the current directory.
        name: String,

        /// Scaffold even if the directory already exists.
        #[arg(long)]
        force: bool,

        /// Skip the dependency installation step after unpacking.
        #[arg(long)]
        no_install: bool,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::New {
                name,
                force,
                no_install,
            } => run_new(&cfg, &name, force, no_install)?,
        }

        Ok(())
    }
}
