//! Export command implementation

use anyhow::Result;
use dbpack_core::layout::{FILES_DIR, TABLES_DIR};
use dbpack_core::TargetName;
use dbpack_db::{ColumnInfo, SqliteBackend};
use dbpack_pack::{describe_tables, export_database, ExportOptions, ExportReport, ItemStatus, Phase};
use std::path::{Path, PathBuf};

use crate::cli::{ExportArgs, GlobalArgs};
use crate::commands::common::{
    failure_message, join_names, load_project, outcome_file_name, print_rule,
    print_subcommand_help, resolve_input_path, resolve_output_path, unknown_names, ExitCode,
};

/// Execute the export command
pub fn execute(args: &ExportArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let options = ExportOptions {
        csv: !args.no_csv,
        json: args.json || project.config.export_json,
    };

    if let Some(file) = &args.file {
        let db_path = resolve_input_path(file, &project.root);
        let output_dir = match &args.output {
            Some(output) => resolve_output_path(output, &project.root),
            None => db_path.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        if !export_one(&db_path, &output_dir, args.info, &options) {
            return Err(ExitCode(1).into());
        }
        return Ok(());
    }

    let available = project.available_artifacts()?;

    if args.list {
        println!("Available database files in build directory:");
        if available.is_empty() {
            println!("  No database files found. Run dbpack build first.");
        }
        for name in &available {
            let size = std::fs::metadata(project.artifact_path(name))
                .map(|m| m.len())
                .unwrap_or(0);
            println!("  - {name} ({:.2} KB)", size as f64 / 1024.0);
        }
        return Ok(());
    }

    let databases: Vec<TargetName> = if args.all {
        if available.is_empty() {
            println!("No database files found in build directory.");
            println!("Please run dbpack build first to create databases.");
            return Ok(());
        }
        available
    } else if !args.databases.is_empty() {
        let invalid = unknown_names(&args.databases, &available);
        if !invalid.is_empty() {
            println!("Error: Database files not found: {}", invalid.join(", "));
            println!("Available databases: {}", join_names(&available));
            return Err(ExitCode(1).into());
        }
        args.databases.iter().map(TargetName::new).collect()
    } else {
        print_subcommand_help("export")?;
        if available.is_empty() {
            println!("\nNo database files found. Run dbpack build first.");
        } else {
            println!("\nAvailable databases: {}", join_names(&available));
            println!("\nUse --all to export all databases or specify database names.");
        }
        println!("Or use --file to export a specific database file.");
        return Err(ExitCode(1).into());
    };

    println!("Exporting {} database(s)...", databases.len());
    let mut success_count = 0;
    for name in &databases {
        let output_dir = project.export_dir().join(name.as_str());
        if export_one(&project.artifact_path(name), &output_dir, args.info, &options) {
            success_count += 1;
        }
    }

    println!();
    print_rule();
    println!(
        "Completed: {}/{} database(s) exported successfully",
        success_count,
        databases.len()
    );
    print_rule();

    if success_count < databases.len() {
        return Err(ExitCode(1).into());
    }
    Ok(())
}

/// Export one database file and print the result; returns whether it
/// succeeded
pub(crate) fn export_one(
    db_path: &Path,
    output_dir: &Path,
    show_info: bool,
    options: &ExportOptions,
) -> bool {
    if !db_path.is_file() {
        println!("Error: Database file not found: {}", db_path.display());
        return false;
    }
    let db_name = db_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    println!();
    print_rule();
    println!("Exporting database: {db_name}");
    println!("Source: {}", db_path.display());
    println!("Output: {}", output_dir.display());
    println!("Format: CSV={}, JSON={}", options.csv, options.json);
    print_rule();

    if show_info {
        print_table_info(db_path);
    }

    let report = match export_database(db_path, output_dir, options) {
        Ok(report) => report,
        Err(e) => {
            println!("✗ Error exporting {db_name}: {e}");
            return false;
        }
    };
    if report.is_empty() {
        println!("  No tables found in database.");
        return false;
    }

    print_export_report(&report);
    println!("\n✓ Export completed for {db_name}");
    true
}

fn print_table_info(db_path: &Path) {
    let summaries = match SqliteBackend::open_existing(db_path) {
        Ok(db) => describe_tables(&db).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    let summaries = match summaries {
        Ok(summaries) => summaries,
        Err(e) => {
            println!("  ✗ Error reading table info: {e}");
            return;
        }
    };

    println!("\nFound {} table(s):", summaries.len());
    for summary in &summaries {
        println!("\n  Table: {}", summary.name);
        println!("  Rows: {}", summary.row_count);
        println!("  Columns:");
        for column in &summary.columns {
            println!("    - {}", describe_column(column));
        }
    }
}

/// `name: TYPE NOT NULL DEFAULT x (PRIMARY KEY)`
pub(crate) fn describe_column(column: &ColumnInfo) -> String {
    let mut line = format!("{}: {}", column.name, column.decl_type);
    if column.not_null {
        line.push_str(" NOT NULL");
    }
    if let Some(default) = column.default_value.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(" DEFAULT ");
        line.push_str(default);
    }
    if column.primary_key {
        line.push_str(" (PRIMARY KEY)");
    }
    line
}

fn print_export_report(report: &ExportReport) {
    let tables_dir: PathBuf = report.output_dir.join(TABLES_DIR);
    let files_dir: PathBuf = report.output_dir.join(FILES_DIR);

    let mut tables = report.items.iter().filter(|i| i.phase == Phase::Tables).peekable();
    if tables.peek().is_some() {
        println!("\nExporting data tables to: {}", tables_dir.display());
    }
    for outcome in tables {
        let table = &outcome.item;
        match &outcome.status {
            ItemStatus::Loaded { rows } => {
                let file = outcome_file_name(outcome);
                println!("  Exported {rows} rows from '{table}' to {file}");
            }
            status => {
                let e = failure_message(status);
                println!("  ✗ Error exporting table '{table}': {e}");
            }
        }
    }

    let mut files = report.items.iter().filter(|i| i.phase == Phase::Files).peekable();
    if files.peek().is_some() {
        println!("\nExporting file tables to: {}", files_dir.display());
    }
    for outcome in files {
        let table = &outcome.item;
        match &outcome.status {
            ItemStatus::Loaded { rows } => {
                println!("  Exported {rows} file(s) from table '{table}' to {table}/");
            }
            ItemStatus::Empty => println!("  ⚠ Table '{table}' is empty"),
            status => {
                let e = failure_message(status);
                println!("  ✗ Error exporting file table '{table}': {e}");
            }
        }
    }
}

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
