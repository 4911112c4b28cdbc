//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "navigator")]
#[command(version)]
#[command(about = "Facility directory database tools: legacy SQL import, seeding, HTTP trigger")]
pub struct Cli {
    /// Defaults to `import` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// SQL script to import instead of the configured one
    #[arg(long, global = true)]
    pub script: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Import the SQL script into the configured database
    Import,
    /// Serve the HTTP import trigger
    Serve,
    /// Create the facility tables if needed and insert the quick fixture data
    Seed,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Import)
    }
}
