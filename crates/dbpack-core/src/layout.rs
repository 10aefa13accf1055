//! On-disk layout of a target directory
//!
//! ```text
//! <target>/
//!   schema.sql              executed first, verbatim
//!   tables/
//!     tables.config         inclusion list for CSV tables
//!     <table>.csv           one data table per file
//!     <name>.config         key/value entries for the config relation
//!     <script>.sql          extra scripts, run after the CSVs
//!   files/
//!     tables.config         inclusion list for file tables
//!     <table>/<file>        one row per file, non-recursive
//! ```
//!
//! The exporter writes the same `tables/` and `files/` shape.

use crate::error::{CoreError, CoreResult};
use crate::table_name::TableName;
use std::path::{Path, PathBuf};

/// Schema definition, executed before anything else
pub const SCHEMA_FILE: &str = "schema.sql";

/// Directory of CSV tables, config files and scripts
pub const TABLES_DIR: &str = "tables";

/// Directory of file-table subdirectories
pub const FILES_DIR: &str = "files";

/// Inclusion list file name, in both `tables/` and `files/`
pub const INCLUSION_FILE: &str = "tables.config";

/// Paths inside one target directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLayout {
    root: PathBuf,
}

impl TargetLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn schema_path(&self) -> PathBuf {
        self.root.join(SCHEMA_FILE)
    }

    pub fn tables_dir(&self) -> PathBuf {
        self.root.join(TABLES_DIR)
    }

    pub fn files_dir(&self) -> PathBuf {
        self.root.join(FILES_DIR)
    }

    /// `tables/tables.config`
    pub fn tables_inclusion_path(&self) -> PathBuf {
        self.tables_dir().join(INCLUSION_FILE)
    }

    /// `files/tables.config`
    pub fn files_inclusion_path(&self) -> PathBuf {
        self.files_dir().join(INCLUSION_FILE)
    }

    /// `tables/<table>.csv`
    pub fn csv_path(&self, table: &str) -> PathBuf {
        self.tables_dir().join(format!("{table}.csv"))
    }

    /// `files/<table>/`
    pub fn file_table_dir(&self, table: &str) -> PathBuf {
        self.files_dir().join(table)
    }

    /// Whether this directory looks like a target at all
    pub fn is_target(&self) -> bool {
        self.tables_dir().exists() || self.files_dir().exists() || self.schema_path().exists()
    }

    /// Every CSV in `tables/`, sorted by table name.
    ///
    /// Stems ending in `.config` are control files saved as CSV and are
    /// skipped.
    pub fn discover_csv_tables(&self) -> CoreResult<Vec<(TableName, PathBuf)>> {
        let mut tables: Vec<(TableName, PathBuf)> = glob_files(&self.tables_dir(), "*.csv")?
            .into_iter()
            .filter_map(|path| {
                let stem = path.file_stem()?.to_str()?;
                if stem.ends_with(".config") {
                    return None;
                }
                Some((TableName::try_new(stem)?, path))
            })
            .collect();
        tables.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(tables)
    }

    /// Every `tables/*.config` except the inclusion list, sorted
    pub fn config_files(&self) -> CoreResult<Vec<PathBuf>> {
        Ok(glob_files(&self.tables_dir(), "*.config")?
            .into_iter()
            .filter(|p| p.file_name().is_some_and(|n| n != INCLUSION_FILE))
            .collect())
    }

    /// Every `tables/*.sql` except a stray `schema.sql`, sorted
    pub fn script_files(&self) -> CoreResult<Vec<PathBuf>> {
        Ok(glob_files(&self.tables_dir(), "*.sql")?
            .into_iter()
            .filter(|p| p.file_name().is_some_and(|n| n != SCHEMA_FILE))
            .collect())
    }

    /// Non-hidden subdirectories of `files/` (excluding `tables`), sorted
    pub fn file_table_dirs(&self) -> CoreResult<Vec<TableName>> {
        let dir = self.files_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries = std::fs::read_dir(&dir).map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?;

        let mut names: Vec<TableName> = entries
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().to_str().map(String::from))
            .filter(|name| !name.starts_with('.') && name != TABLES_DIR)
            .filter_map(TableName::try_new)
            .collect();
        names.sort();
        Ok(names)
    }
}

/// Regular files in `dir` matching `pattern`, sorted by path.
///
/// A missing directory yields an empty list.
pub fn glob_files(dir: &Path, pattern: &str) -> CoreResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let full = format!("{escaped}/{pattern}");
    let paths = glob::glob(&full).map_err(|e| CoreError::InvalidPattern {
        pattern: full.clone(),
        message: e.to_string(),
    })?;

    let mut files: Vec<PathBuf> = paths
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("Skipping unreadable path during discovery: {e}");
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
