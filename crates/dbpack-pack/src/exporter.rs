//! Write an artifact back out in the target directory layout
//!
//! Data tables become `tables/<name>.csv` (and optionally `.json`); file
//! tables become `files/<name>/<code>`, one file per row.

use crate::error::{PackError, PackResult};
use crate::report::{ExportReport, ItemStatus, Phase};
use dbpack_core::layout::{FILES_DIR, TABLES_DIR};
use dbpack_db::{CellValue, ColumnInfo, Database, FileTableShape, SqliteBackend, TableData};
use serde_json::{Map, Value};
use std::path::Path;

/// Output formats for data tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub csv: bool,
    pub json: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            csv: true,
            json: false,
        }
    }
}

/// How a relation is exported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableKind {
    /// Rows written to CSV/JSON
    Data,
    /// One file per row under `files/<name>/`
    File(FileTableShape),
}

impl TableKind {
    pub fn classify(columns: &[ColumnInfo]) -> Self {
        match FileTableShape::detect(columns) {
            Some(shape) => TableKind::File(shape),
            None => TableKind::Data,
        }
    }
}

/// Row count and column metadata of one relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub name: String,
    pub kind: TableKind,
    pub row_count: usize,
    pub columns: Vec<ColumnInfo>,
}

/// Summarise every user table of `db`, sorted by name
pub fn describe_tables(db: &dyn Database) -> PackResult<Vec<TableSummary>> {
    let mut summaries = Vec::new();
    for name in db.list_tables()? {
        let columns = db.table_info(&name)?;
        summaries.push(TableSummary {
            kind: TableKind::classify(&columns),
            row_count: db.row_count(&name)?,
            name,
            columns,
        });
    }
    Ok(summaries)
}

/// Export the artifact at `db_path` into `output_dir`.
///
/// Creates `tables/` and `files/` under `output_dir` unless the database has
/// no user tables, in which case nothing is written and the returned report
/// is empty. A table that fails to export is recorded and skipped.
pub fn export_database(
    db_path: &Path,
    output_dir: &Path,
    options: &ExportOptions,
) -> PackResult<ExportReport> {
    if !db_path.is_file() {
        return Err(PackError::DatabaseNotFound {
            path: db_path.display().to_string(),
        });
    }
    let db = SqliteBackend::open_existing(db_path)?;
    let mut report = ExportReport::new(db_path.to_path_buf(), output_dir.to_path_buf());

    let tables = db.list_tables()?;
    report.table_count = tables.len();
    if tables.is_empty() {
        log::info!("No tables found in {}", db_path.display());
        return Ok(report);
    }

    let tables_dir = output_dir.join(TABLES_DIR);
    let files_dir = output_dir.join(FILES_DIR);
    for dir in [&tables_dir, &files_dir] {
        std::fs::create_dir_all(dir).map_err(|e| PackError::io(dir, e))?;
    }

    let mut data_tables = Vec::new();
    let mut file_tables = Vec::new();
    for table in tables {
        match db.table_info(&table) {
            Ok(columns) => match TableKind::classify(&columns) {
                TableKind::Data => data_tables.push(table),
                TableKind::File(shape) => file_tables.push((table, shape)),
            },
            Err(e) => {
                log::warn!("Error inspecting table '{table}': {e}");
                report.push(Phase::Tables, table, None, ItemStatus::Failed(e.to_string()));
            }
        }
    }

    for table in data_tables {
        export_data_table(&db, &table, &tables_dir, options, &mut report);
    }
    for (table, shape) in file_tables {
        let table_dir = files_dir.join(&table);
        let status = match export_file_table(&db, &table, &shape, &table_dir) {
            Ok(0) => ItemStatus::Empty,
            Ok(files) => ItemStatus::Loaded { rows: files },
            Err(e) => {
                log::warn!("Error exporting file table '{table}': {e}");
                ItemStatus::Failed(e.to_string())
            }
        };
        report.push(Phase::Files, table, Some(table_dir), status);
    }

    Ok(report)
}

fn export_data_table(
    db: &dyn Database,
    table: &str,
    tables_dir: &Path,
    options: &ExportOptions,
    report: &mut ExportReport,
) {
    let data = match db.query_table(table) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Error exporting table '{table}': {e}");
            report.push(Phase::Tables, table, None, ItemStatus::Failed(e.to_string()));
            return;
        }
    };

    let mut outputs: Vec<(&str, fn(&TableData, &Path) -> PackResult<()>)> = Vec::new();
    if options.csv {
        outputs.push(("csv", write_csv));
    }
    if options.json {
        outputs.push(("json", write_json));
    }

    for (extension, write) in outputs {
        let path = tables_dir.join(format!("{table}.{extension}"));
        let status = match write(&data, &path) {
            Ok(()) => ItemStatus::Loaded {
                rows: data.row_count(),
            },
            Err(e) => {
                log::warn!("Error exporting table '{table}': {e}");
                ItemStatus::Failed(e.to_string())
            }
        };
        report.push(Phase::Tables, table, Some(path), status);
    }
}

/// Write a header row followed by every row as text, CRLF-terminated.
///
/// NULL becomes an empty field.
pub fn write_csv(data: &TableData, path: &Path) -> PackResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(path)
        .map_err(|e| PackError::csv(path, e))?;

    writer
        .write_record(&data.columns)
        .map_err(|e| PackError::csv(path, e))?;
    for row in &data.rows {
        writer
            .write_record(row.iter().map(CellValue::to_text))
            .map_err(|e| PackError::csv(path, e))?;
    }
    writer.flush().map_err(|e| PackError::io(path, e))?;
    Ok(())
}

/// Write the rows as a pretty-printed JSON array of objects keyed by column
pub fn write_json(data: &TableData, path: &Path) -> PackResult<()> {
    let records: Vec<Value> = data
        .rows
        .iter()
        .map(|row| {
            let object: Map<String, Value> = data
                .columns
                .iter()
                .cloned()
                .zip(row.iter().map(json_value))
                .collect();
            Value::Object(object)
        })
        .collect();

    let text = serde_json::to_string_pretty(&records).map_err(|e| PackError::Json {
        path: path.display().to_string(),
        source: e,
    })?;
    std::fs::write(path, text).map_err(|e| PackError::io(path, e))
}

fn json_value(cell: &CellValue) -> Value {
    match cell {
        CellValue::Null => Value::Null,
        CellValue::Integer(i) => Value::from(*i),
        CellValue::Real(r) => Value::from(*r),
        CellValue::Text(t) => Value::String(t.clone()),
        CellValue::Blob(_) => Value::String(cell.to_text()),
    }
}

/// Write each row of a file table to `table_dir/<code>`.
///
/// Rows without a usable code or with a NULL payload are skipped. A table
/// with no rows creates no directory. Returns the number of files written.
pub fn export_file_table(
    db: &dyn Database,
    table: &str,
    shape: &FileTableShape,
    table_dir: &Path,
) -> PackResult<usize> {
    let rows = db.query_file_rows(table, shape)?;
    if rows.is_empty() {
        log::info!("File table '{table}' is empty");
        return Ok(0);
    }
    std::fs::create_dir_all(table_dir).map_err(|e| PackError::io(table_dir, e))?;

    let mut written = 0;
    for row in rows {
        let (Some(code), Some(payload)) = (row.code, row.payload) else {
            continue;
        };
        if !is_plain_file_name(&code) {
            log::warn!("Skipping row of '{table}' with unusable file name {code:?}");
            continue;
        }
        let path = table_dir.join(&code);
        match std::fs::write(&path, payload) {
            Ok(()) => written += 1,
            Err(e) => log::warn!("Error writing file {code} of '{table}': {e}"),
        }
    }
    Ok(written)
}

fn is_plain_file_name(code: &str) -> bool {
    !code.is_empty() && code != "." && code != ".." && !code.contains(['/', '\\'])
}

#[cfg(test)]
#[path = "exporter_test.rs"]
mod tests;
