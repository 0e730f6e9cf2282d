use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod query;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use query::{QueryArgs, QueryPatch};
pub use root_commands::Commands;

/// Top-level CLI parser for the `prism` binary.
#[derive(Debug, Parser)]
#[command(
    name = "prism",
    version,
    about = "Prism - filter, sort and render practice-session views"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max rows to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON entry file (defaults to `general.entries_path`)
    #[arg(short, long, global = true)]
    pub entries: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            entries: self.entries.clone(),
        }
    }
}
