//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use clap::CommandFactory;
use dbpack_core::{Project, TargetName};
use dbpack_pack::{ItemOutcome, ItemStatus};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, GlobalArgs};

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Empty: main prints nothing for a control-flow exit
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load the project from the global arguments
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    Project::load(&global.project_dir, global.config.as_deref()).context("Failed to load project")
}

/// Print a 60-column `=` separator
pub(crate) fn print_rule() {
    println!("{}", "=".repeat(60));
}

/// Print the help text of one subcommand
pub(crate) fn print_subcommand_help(name: &str) -> Result<()> {
    let mut cli = Cli::command();
    if let Some(sub) = cli.find_subcommand_mut(name) {
        sub.print_help().context("Failed to print help")?;
    }
    Ok(())
}

/// Requested names that are not in `available`, in request order
pub(crate) fn unknown_names<'a>(requested: &'a [String], available: &[TargetName]) -> Vec<&'a str> {
    requested
        .iter()
        .map(String::as_str)
        .filter(|name| !available.iter().any(|a| a == name))
        .collect()
}

pub(crate) fn join_names(names: &[TargetName]) -> String {
    names
        .iter()
        .map(TargetName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resolve a user-supplied path: absolute paths and paths that exist
/// relative to the current directory are used as given, anything else is
/// taken relative to the project root.
pub(crate) fn resolve_input_path(path: &Path, project_root: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

/// Resolve a user-supplied output path against the project root
pub(crate) fn resolve_output_path(path: &Path, project_root: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

/// File name of an outcome's path, falling back to the item name
pub(crate) fn outcome_file_name(outcome: &ItemOutcome) -> String {
    outcome
        .path
        .as_deref()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| outcome.item.clone())
}

/// Error message of a failed outcome, empty otherwise
pub(crate) fn failure_message(status: &ItemStatus) -> &str {
    match status {
        ItemStatus::Failed(message) => message.as_str(),
        _ => "",
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
