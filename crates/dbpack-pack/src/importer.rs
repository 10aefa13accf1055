//! Build an artifact from a target directory
//!
//! [`build_target`] deletes the previous artifact and runs the phases in a
//! fixed order: schema, CSV tables, config files, scripts, file tables. Only
//! a schema failure aborts the build; every other failure is logged,
//! recorded in the [`BuildReport`] and skipped.

use crate::error::{PackError, PackResult};
use crate::report::{BuildReport, ItemStatus, Phase, TableSource};
use dbpack_core::{InclusionList, KvConfigFile, Project, TableName, TargetLayout, TargetName};
use dbpack_db::{Database, SqliteBackend, CONFIG_TABLE};
use std::path::{Path, PathBuf};

/// Execute `schema_path` against `db`, if it exists.
///
/// Returns whether a schema was applied.
pub fn apply_schema(db: &dyn Database, schema_path: &Path) -> PackResult<bool> {
    if !schema_path.is_file() {
        return Ok(false);
    }
    let sql = std::fs::read_to_string(schema_path).map_err(|e| PackError::io(schema_path, e))?;
    db.execute_batch(&sql).map_err(|e| PackError::Schema {
        path: schema_path.display().to_string(),
        source: e,
    })?;
    Ok(true)
}

/// Load one CSV file into `table` (default: the file stem).
///
/// Creates the relation with one TEXT column per header field if it does
/// not exist yet, then upserts every row as literal text. Rows shorter than
/// the header store NULL for the missing fields; extra fields are ignored.
/// Returns the number of rows written.
pub fn load_csv_table(
    db: &dyn Database,
    csv_path: &Path,
    table: Option<&TableName>,
) -> PackResult<usize> {
    let table = match table {
        Some(t) => t.clone(),
        None => table_name_from_stem(csv_path)?,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(csv_path)
        .map_err(|e| PackError::csv(csv_path, e))?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| PackError::csv(csv_path, e))?
        .iter()
        .map(String::from)
        .collect();
    if columns.is_empty() {
        log::debug!("{} has no header, nothing to load", csv_path.display());
        return Ok(0);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| PackError::csv(csv_path, e))?;
        let row: Vec<Option<String>> = (0..columns.len())
            .map(|i| record.get(i).map(String::from))
            .collect();
        rows.push(row);
    }

    if db.relation_exists(&table)? {
        log::debug!("Loading into existing relation '{table}'");
    } else {
        db.create_text_table(&table, &columns)?;
    }
    let written = db.upsert_rows(&table, &columns, &rows)?;
    log::debug!("Loaded {written} rows into '{table}' from {}", csv_path.display());
    Ok(written)
}

fn table_name_from_stem(path: &Path) -> PackResult<TableName> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .and_then(TableName::try_new)
        .ok_or_else(|| {
            PackError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "no usable file name"),
            )
        })
}

/// Load a key/value config file into the `config` relation.
///
/// Returns the number of entries upserted.
pub fn load_config_file(db: &dyn Database, config_path: &Path) -> PackResult<usize> {
    db.ensure_config_table()?;
    let file = KvConfigFile::load(config_path)?;
    Ok(db.upsert_config(&file.entries)?)
}

/// Execute every statement in `script_path`.
///
/// Statements before a failing one stay applied; the rest of the file is
/// not run.
pub fn run_script(db: &dyn Database, script_path: &Path) -> PackResult<()> {
    let sql = std::fs::read_to_string(script_path).map_err(|e| PackError::io(script_path, e))?;
    db.execute_batch(&sql)?;
    Ok(())
}

/// Load every regular file directly inside `dir` into the file table
/// `table` (`ID`, `code` = file name, `file_blob` = raw bytes).
///
/// Subdirectories are ignored. A file that cannot be read is logged and
/// skipped. Returns the number of files stored.
pub fn load_file_table(db: &dyn Database, table: &TableName, dir: &Path) -> PackResult<usize> {
    db.ensure_file_table(table)?;
    if !dir.is_dir() {
        return Ok(0);
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| PackError::io(dir, e))?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    paths.sort();

    let files = read_files(table, &paths);
    Ok(db.insert_files(table, &files)?)
}

/// Read each path as `(file name, bytes)`, logging and skipping any file that
/// cannot be read or has a non UTF-8 name.
fn read_files(table: &TableName, paths: &[PathBuf]) -> Vec<(String, Vec<u8>)> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(code) = path.file_name().and_then(|n| n.to_str()).map(String::from) else {
            log::warn!("Skipping file with non UTF-8 name {}", path.display());
            continue;
        };
        match std::fs::read(path) {
            Ok(bytes) => files.push((code, bytes)),
            Err(e) => log::warn!("Error loading file {code} into '{table}': {e}"),
        }
    }
    files
}

/// Build the artifact for `target` in `project`'s build directory
pub fn build_target(project: &Project, target: &TargetName) -> PackResult<BuildReport> {
    let layout = project.target_layout(target);
    let build_dir = project.build_dir();
    std::fs::create_dir_all(&build_dir).map_err(|e| PackError::io(&build_dir, e))?;
    build_target_at(&layout, target, &project.artifact_path(target))
}

/// Build the artifact for the target at `layout` into `artifact`
pub fn build_target_at(
    layout: &TargetLayout,
    target: &TargetName,
    artifact: &Path,
) -> PackResult<BuildReport> {
    if !layout.root().is_dir() {
        return Err(PackError::TargetNotFound {
            path: layout.root().display().to_string(),
        });
    }

    log::info!("Building '{target}' into {}", artifact.display());
    let db = SqliteBackend::create_fresh(artifact)?;
    log::debug!("Created fresh {} artifact {}", db.db_type(), artifact.display());
    let mut report = BuildReport::new(target.clone(), artifact.to_path_buf());

    report.schema_applied = apply_schema(&db, &layout.schema_path())?;
    if report.schema_applied {
        report.push(
            Phase::Schema,
            dbpack_core::layout::SCHEMA_FILE,
            Some(layout.schema_path()),
            ItemStatus::Executed,
        );
    }

    if layout.tables_dir().is_dir() {
        prepare_config_relation(&db, layout, &mut report);
        load_tables_phase(&db, layout, &mut report);
        load_config_phase(&db, layout, &mut report);
        run_scripts_phase(&db, layout, &mut report);
    }
    if layout.files_dir().is_dir() {
        load_files_phase(&db, layout, &mut report);
    }

    Ok(report)
}

/// Read an inclusion list, recording an unreadable one as a failed item.
///
/// An unreadable list is treated as absent afterwards.
fn read_inclusion(path: &Path, phase: Phase, report: &mut BuildReport) -> Option<InclusionList> {
    match InclusionList::load(path) {
        Ok(list) => list,
        Err(e) => {
            log::warn!("[{}] {e}", report.target);
            report.push(
                phase,
                dbpack_core::layout::INCLUSION_FILE,
                Some(path.to_path_buf()),
                ItemStatus::Failed(e.to_string()),
            );
            None
        }
    }
}

/// Create the keyed `config` relation ahead of the CSV tables when config
/// files are present; a `config.csv` from an earlier export then upserts by
/// key.
fn prepare_config_relation(db: &dyn Database, layout: &TargetLayout, report: &mut BuildReport) {
    let has_config_files = layout.config_files().is_ok_and(|files| !files.is_empty());
    if !has_config_files {
        return;
    }
    if let Err(e) = db.ensure_config_table() {
        log::warn!("[{}] Error creating '{CONFIG_TABLE}': {e}", report.target);
        report.push(Phase::Config, CONFIG_TABLE, None, ItemStatus::Failed(e.to_string()));
    }
}

fn load_tables_phase(db: &dyn Database, layout: &TargetLayout, report: &mut BuildReport) {
    let listed = read_inclusion(&layout.tables_inclusion_path(), Phase::Tables, report)
        .filter(|list| !list.is_empty());

    let selected: Vec<(TableName, PathBuf)> = match listed {
        Some(list) => {
            report.table_source = TableSource::InclusionList { count: list.len() };
            let mut selected = Vec::new();
            for table in list.into_names() {
                let csv_path = layout.csv_path(&table);
                if csv_path.is_file() {
                    selected.push((table, csv_path));
                } else {
                    log::warn!("[{}] CSV file not found for table '{table}'", report.target);
                    report.push(
                        Phase::Tables,
                        table.into_inner(),
                        Some(csv_path),
                        ItemStatus::Missing,
                    );
                }
            }
            selected
        }
        None => {
            report.table_source = TableSource::Discovered;
            match layout.discover_csv_tables() {
                Ok(found) => found,
                Err(e) => {
                    log::warn!("[{}] CSV discovery failed: {e}", report.target);
                    report.push(
                        Phase::Tables,
                        dbpack_core::layout::TABLES_DIR,
                        Some(layout.tables_dir()),
                        ItemStatus::Failed(e.to_string()),
                    );
                    Vec::new()
                }
            }
        }
    };

    for (table, csv_path) in selected {
        let status = match load_csv_table(db, &csv_path, Some(&table)) {
            Ok(rows) => ItemStatus::Loaded { rows },
            Err(e) => {
                log::warn!("[{}] Error loading table '{table}': {e}", report.target);
                ItemStatus::Failed(e.to_string())
            }
        };
        report.push(Phase::Tables, table.into_inner(), Some(csv_path), status);
    }
}

fn load_config_phase(db: &dyn Database, layout: &TargetLayout, report: &mut BuildReport) {
    let files = match layout.config_files() {
        Ok(files) => files,
        Err(e) => {
            log::warn!("[{}] Config discovery failed: {e}", report.target);
            report.push(Phase::Config, "*.config", None, ItemStatus::Failed(e.to_string()));
            return;
        }
    };

    for path in files {
        let name = file_label(&path);
        let status = match load_config_file(db, &path) {
            Ok(0) => ItemStatus::Empty,
            Ok(rows) => ItemStatus::Loaded { rows },
            Err(e) => {
                log::warn!("[{}] Error loading {name}: {e}", report.target);
                ItemStatus::Failed(e.to_string())
            }
        };
        report.push(Phase::Config, name, Some(path), status);
    }
}

fn run_scripts_phase(db: &dyn Database, layout: &TargetLayout, report: &mut BuildReport) {
    let scripts = match layout.script_files() {
        Ok(scripts) => scripts,
        Err(e) => {
            log::warn!("[{}] Script discovery failed: {e}", report.target);
            report.push(Phase::Scripts, "*.sql", None, ItemStatus::Failed(e.to_string()));
            return;
        }
    };

    for path in scripts {
        let name = file_label(&path);
        let status = match run_script(db, &path) {
            Ok(()) => ItemStatus::Executed,
            Err(e) => {
                log::warn!("[{}] Error executing {name}: {e}", report.target);
                ItemStatus::Failed(e.to_string())
            }
        };
        report.push(Phase::Scripts, name, Some(path), status);
    }
}

fn load_files_phase(db: &dyn Database, layout: &TargetLayout, report: &mut BuildReport) {
    let Some(list) = read_inclusion(&layout.files_inclusion_path(), Phase::Files, report)
        .filter(|list| !list.is_empty())
    else {
        log::info!("[{}] No file tables listed, skipping", report.target);
        return;
    };
    report.file_tables_listed = Some(list.len());

    for table in list.into_names() {
        let dir = layout.file_table_dir(&table);
        if !dir.is_dir() {
            log::warn!("[{}] Directory not found for file table '{table}'", report.target);
            report.push(Phase::Files, table.into_inner(), Some(dir), ItemStatus::Missing);
            continue;
        }
        let status = match load_file_table(db, &table, &dir) {
            Ok(0) => ItemStatus::Empty,
            Ok(rows) => ItemStatus::Loaded { rows },
            Err(e) => {
                log::warn!("[{}] Error processing file table '{table}': {e}", report.target);
                ItemStatus::Failed(e.to_string())
            }
        };
        report.push(Phase::Files, table.into_inner(), Some(dir), status);
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
#[path = "importer_test.rs"]
mod tests;
