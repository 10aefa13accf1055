//! Database trait definition

use crate::error::DbResult;
use crate::schema::{ColumnInfo, FileRow, FileTableShape};
use crate::value::TableData;
use dbpack_core::ConfigEntry;

/// Storage operations the importer and exporter need.
///
/// Relation and column names are interpolated verbatim; callers pass names
/// that are already valid identifiers. Each multi-row write runs in its own
/// transaction and either lands completely or not at all.
pub trait Database {
    /// Execute a batch of `;`-separated statements
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Check if a table or view exists
    fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Create `table` with one nullable TEXT column per name, if absent
    fn create_text_table(&self, table: &str, columns: &[String]) -> DbResult<()>;

    /// `INSERT OR REPLACE` every row; returns the number of rows written
    fn upsert_rows(
        &self,
        table: &str,
        columns: &[String],
        rows: &[Vec<Option<String>>],
    ) -> DbResult<usize>;

    /// Create the `config (key, value, updated_at)` relation, if absent
    fn ensure_config_table(&self) -> DbResult<()>;

    /// Upsert entries into `config` by key; returns the number written
    fn upsert_config(&self, entries: &[ConfigEntry]) -> DbResult<usize>;

    /// Create `table (ID, code, file_blob)`, if absent
    fn ensure_file_table(&self, table: &str) -> DbResult<()>;

    /// Insert one row per `(code, payload)`; returns the number written
    fn insert_files(&self, table: &str, files: &[(String, Vec<u8>)]) -> DbResult<usize>;

    /// User tables, sorted by name, excluding SQLite's internal tables
    fn list_tables(&self) -> DbResult<Vec<String>>;

    /// Column metadata in declaration order
    fn table_info(&self, table: &str) -> DbResult<Vec<ColumnInfo>>;

    /// Number of rows in `table`
    fn row_count(&self, table: &str) -> DbResult<usize>;

    /// Every row of `table` with its column names
    fn query_table(&self, table: &str) -> DbResult<TableData>;

    /// Code and payload of every row of a file table, in identifier order
    fn query_file_rows(&self, table: &str, shape: &FileTableShape) -> DbResult<Vec<FileRow>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
