//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// dbpack - Build SQLite artifacts from directory trees and export them back
#[derive(Parser, Debug)]
#[command(name = "dbpack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build one artifact per target directory
    Build(BuildArgs),

    /// Export artifacts to CSV/JSON tables and raw files
    Export(ExportArgs),

    /// Export every built artifact back into its target directory
    Sync(SyncArgs),

    /// Generate tables.config inclusion lists from the files on disk
    GenConfig(GenConfigArgs),
}

/// Arguments for the build command
#[derive(Args, Debug)]
#[command(after_help = "Examples:
  dbpack build --all
  dbpack build shop catalog
  dbpack build --list")]
pub struct BuildArgs {
    /// Targets to build (directory names under the data path)
    pub targets: Vec<String>,

    /// Build all available targets
    #[arg(short, long, conflicts_with = "targets")]
    pub all: bool,

    /// List available targets
    #[arg(short, long)]
    pub list: bool,
}

/// Arguments for the export command
#[derive(Args, Debug)]
#[command(after_help = "Examples:
  dbpack export --all
  dbpack export shop --json
  dbpack export --file build/shop.db3 --output out --no-csv --json")]
pub struct ExportArgs {
    /// Artifacts to export, by name (e.g. shop for build/shop.db3)
    pub databases: Vec<String>,

    /// Export all artifacts in the build path
    #[arg(short, long, conflicts_with = "databases")]
    pub all: bool,

    /// List available artifacts with their sizes
    #[arg(short, long)]
    pub list: bool,

    /// Show row counts and column metadata before exporting
    #[arg(short, long)]
    pub info: bool,

    /// Export a single database file by path
    #[arg(short, long, conflicts_with_all = ["databases", "all"])]
    pub file: Option<PathBuf>,

    /// Output directory for --file (default: the file's directory)
    #[arg(short, long, requires = "file")]
    pub output: Option<PathBuf>,

    /// Write CSV files (default)
    #[arg(long, overrides_with = "no_csv")]
    pub csv: bool,

    /// Do not write CSV files (use with --json to export only JSON)
    #[arg(long, overrides_with = "csv")]
    pub no_csv: bool,

    /// Also write JSON files
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {}

/// Arguments for the gen-config command
#[derive(Args, Debug)]
pub struct GenConfigArgs {}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
