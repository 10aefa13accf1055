//! Build command implementation

use anyhow::Result;
use dbpack_core::{Project, TargetName};
use dbpack_pack::{build_target, BuildReport, ItemOutcome, ItemStatus, Phase, TableSource};

use crate::cli::{BuildArgs, GlobalArgs};
use crate::commands::common::{
    failure_message, join_names, load_project, outcome_file_name, print_rule,
    print_subcommand_help, unknown_names, ExitCode,
};

/// Execute the build command
pub fn execute(args: &BuildArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let available = project.available_targets()?;

    if args.list {
        println!("Available database targets:");
        for target in &available {
            println!("  - {target}");
        }
        return Ok(());
    }

    let targets: Vec<TargetName> = if args.all {
        if available.is_empty() {
            println!("No available targets found in data directory.");
            return Ok(());
        }
        available
    } else if !args.targets.is_empty() {
        let invalid = unknown_names(&args.targets, &available);
        if !invalid.is_empty() {
            println!("Error: Invalid targets: {}", invalid.join(", "));
            println!("Available targets: {}", join_names(&available));
            return Err(ExitCode(1).into());
        }
        args.targets.iter().map(TargetName::new).collect()
    } else {
        print_subcommand_help("build")?;
        println!("\nAvailable targets: {}", join_names(&available));
        println!("\nUse --all to build all targets or specify target names.");
        return Err(ExitCode(1).into());
    };

    println!("Building {} database(s)...", targets.len());
    let mut success_count = 0;
    for target in &targets {
        if build_one(&project, target) {
            success_count += 1;
        }
    }

    println!();
    print_rule();
    println!(
        "Completed: {}/{} database(s) built successfully",
        success_count,
        targets.len()
    );
    print_rule();

    if success_count < targets.len() {
        return Err(ExitCode(1).into());
    }
    Ok(())
}

/// Build one target and print its report; returns whether it succeeded
fn build_one(project: &Project, target: &TargetName) -> bool {
    let artifact = project.artifact_path(target);
    println!();
    print_rule();
    println!("Building database: {target}");
    println!("Output: {}", artifact.display());
    print_rule();

    match build_target(project, target) {
        Ok(report) => {
            let has_files_dir = project.target_layout(target).files_dir().is_dir();
            print_report(&report, has_files_dir);
            println!("✓ Database built successfully: {}", artifact.display());
            true
        }
        Err(e) => {
            println!("✗ Error building '{target}': {e}");
            false
        }
    }
}

fn print_report(report: &BuildReport, has_files_dir: bool) {
    if report.schema_applied {
        println!("✓ Schema loaded successfully");
    }

    if let TableSource::InclusionList { count } = report.table_source {
        println!("  Processing {count} specified table(s) from tables.config...");
    }
    for outcome in report.phase_items(Phase::Tables) {
        print_table_outcome(outcome, report.table_source);
    }

    for outcome in report.phase_items(Phase::Config) {
        let name = outcome_file_name(outcome);
        match &outcome.status {
            ItemStatus::Failed(e) => println!("  ✗ Error loading {name}: {e}"),
            _ => println!("  ✓ Loaded config from {name}"),
        }
    }

    for outcome in report.phase_items(Phase::Scripts) {
        let name = outcome_file_name(outcome);
        match &outcome.status {
            ItemStatus::Failed(e) => println!("  ✗ Error executing {name}: {e}"),
            _ => println!("  ✓ Executed {name}"),
        }
    }

    match report.file_tables_listed {
        Some(count) => {
            println!("  Processing {count} file table(s) from files/tables.config...");
        }
        None if has_files_dir => {
            println!("  ℹ No files/tables.config found or empty, skipping file tables");
        }
        None => {}
    }
    for outcome in report.phase_items(Phase::Files) {
        print_file_table_outcome(outcome);
    }
}

fn print_table_outcome(outcome: &ItemOutcome, source: TableSource) {
    let table = &outcome.item;
    let file = outcome_file_name(outcome);
    match (&outcome.status, source) {
        (ItemStatus::Missing, _) => {
            println!("  ⚠ CSV file not found for table '{table}': {file}");
        }
        (ItemStatus::Failed(e), _) if file == dbpack_core::layout::INCLUSION_FILE => {
            println!("  ✗ Error reading {file}, using all CSV files: {e}");
        }
        (ItemStatus::Failed(e), TableSource::InclusionList { .. }) => {
            println!("  ✗ Error loading table '{table}' from {file}: {e}");
        }
        (ItemStatus::Failed(e), _) => println!("  ✗ Error loading {file}: {e}"),
        (_, TableSource::InclusionList { .. }) => {
            println!("  ✓ Loaded table '{table}' from {file}");
        }
        _ => println!("  ✓ Loaded {file} (no tables.config found, using all CSV files)"),
    }
}

fn print_file_table_outcome(outcome: &ItemOutcome) {
    let table = &outcome.item;
    match &outcome.status {
        ItemStatus::Failed(e) if table == dbpack_core::layout::INCLUSION_FILE => {
            println!("  ✗ Error reading files/{table}: {e}");
        }
        ItemStatus::Loaded { rows } => {
            println!("  ✓ Created table '{table}' with {rows} file(s)");
        }
        ItemStatus::Empty => {
            println!("  ⚠ Table '{table}' created but no files found in {table}/");
        }
        ItemStatus::Missing => {
            let dir = outcome
                .path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            println!("  ⚠ Directory not found for file table '{table}': {dir}");
        }
        status => {
            let e = failure_message(status);
            println!("  ✗ Error processing file table '{table}': {e}");
        }
    }
}

#[cfg(test)]
#[path = "build_test.rs"]
mod tests;
