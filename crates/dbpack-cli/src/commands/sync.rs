//! Sync command implementation

use anyhow::Result;
use dbpack_pack::{sync_artifact, ItemStatus};

use crate::cli::{GlobalArgs, SyncArgs};
use crate::commands::common::{load_project, print_rule, ExitCode};

/// Execute the sync command
pub fn execute(_args: &SyncArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let build_dir = project.build_dir();
    if !build_dir.is_dir() {
        println!("Error: Build directory not found: {}", build_dir.display());
        return Ok(());
    }

    let artifacts = project.available_artifacts()?;
    if artifacts.is_empty() {
        println!("No database files found in {}", build_dir.display());
        return Ok(());
    }

    println!("Found {} database file(s)", artifacts.len());
    println!("Syncing into {}...", project.data_dir().display());

    let mut success_count = 0;
    for name in &artifacts {
        let target_dir = project.data_dir().join(name.as_str());
        println!();
        print_rule();
        println!("Syncing database: {name}");
        println!("Source: {}", project.artifact_path(name).display());
        println!("Target: {}", target_dir.display());
        print_rule();

        match sync_artifact(&project, name) {
            Ok(report) if report.is_empty() => {
                println!("✗ {name}: no tables found in database");
            }
            Ok(report) => {
                let written = report
                    .items
                    .iter()
                    .filter(|i| matches!(i.status, ItemStatus::Loaded { .. }))
                    .count();
                let failed = report.items.iter().filter(|i| i.status.is_failure()).count();
                if failed > 0 {
                    println!("⚠ {name} synced with {failed} failed table(s)");
                } else {
                    println!("✓ {name} synced ({written} table(s))");
                }
                success_count += 1;
            }
            Err(e) => println!("✗ Error syncing {name}: {e}"),
        }
    }

    println!();
    print_rule();
    println!(
        "Completed: {}/{} database(s) synced successfully",
        success_count,
        artifacts.len()
    );
    print_rule();

    if success_count < artifacts.len() {
        return Err(ExitCode(1).into());
    }
    Ok(())
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
