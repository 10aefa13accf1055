//! Generate inclusion lists from what a target already contains

use crate::error::{PackError, PackResult};
use dbpack_core::{InclusionList, TableName, TargetLayout};
use std::path::Path;

const TABLES_HEADER: &[&str] = &[
    "Tables configuration",
    "List of table names to be included in the database",
    "CSV file names should match table names (e.g., users.csv -> users table)",
    "Auto-generated based on existing CSV files",
];

const FILES_HEADER: &[&str] = &[
    "Files tables configuration",
    "List of table names to be created from subdirectories",
    "Each subdirectory name should match a table name",
    "Auto-generated based on existing subdirectories",
];

/// Which lists were written, and how many names each holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaffoldOutcome {
    /// `tables/tables.config`; `None` when there was nothing to list
    pub tables: Option<usize>,
    /// `files/tables.config`; `None` when there was nothing to list
    pub files: Option<usize>,
}

impl ScaffoldOutcome {
    pub fn is_empty(&self) -> bool {
        self.tables.is_none() && self.files.is_none()
    }
}

/// Write `tables/tables.config` and `files/tables.config` for the target at
/// `layout`, overwriting existing lists.
///
/// A list is only written when it would name at least one table.
pub fn generate_inclusion_lists(layout: &TargetLayout) -> PackResult<ScaffoldOutcome> {
    let mut outcome = ScaffoldOutcome::default();

    if layout.tables_dir().is_dir() {
        let tables: Vec<TableName> = layout
            .discover_csv_tables()?
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        outcome.tables = write_list(&layout.tables_inclusion_path(), TABLES_HEADER, &tables)?;
    }

    if layout.files_dir().is_dir() {
        let tables = layout.file_table_dirs()?;
        outcome.files = write_list(&layout.files_inclusion_path(), FILES_HEADER, &tables)?;
    }

    Ok(outcome)
}

fn write_list(path: &Path, header: &[&str], names: &[TableName]) -> PackResult<Option<usize>> {
    if names.is_empty() {
        return Ok(None);
    }
    std::fs::write(path, InclusionList::render(header, names)).map_err(|e| PackError::io(path, e))?;
    log::debug!("Wrote {} names to {}", names.len(), path.display());
    Ok(Some(names.len()))
}

#[cfg(test)]
#[path = "scaffold_test.rs"]
mod tests;
