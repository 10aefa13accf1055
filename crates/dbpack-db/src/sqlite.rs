//! SQLite database backend implementation

use crate::error::{DbError, DbResult};
use crate::schema::{ColumnInfo, FileRow, FileTableShape};
use crate::traits::Database;
use crate::value::{CellValue, TableData};
use dbpack_core::ConfigEntry;
use rusqlite::types::ValueRef;
use rusqlite::{params, params_from_iter, Connection, Transaction};
use std::path::Path;

/// Name of the reserved key/value relation
pub const CONFIG_TABLE: &str = "config";


/// SQLite database backend.
///
/// Single-threaded: one backend per artifact, used to completion before the
/// next one is opened.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Create a new in-memory SQLite connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Open (or create) the database file at `path`
    pub fn open(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| DbError::ConnectionError(format!("{e}: {}", path.display())))?;
        Ok(Self { conn })
    }

    /// Open an existing database file without creating it
    pub fn open_existing(path: &Path) -> DbResult<Self> {
        if !path.is_file() {
            return Err(DbError::ConnectionError(format!(
                "database file not found: {}",
                path.display()
            )));
        }
        Self::open(path)
    }

    /// Delete any file at `path` and open a fresh, empty database there
    pub fn create_fresh(path: &Path) -> DbResult<Self> {
        if path.exists() {
            log::debug!("Removing existing database {}", path.display());
            std::fs::remove_file(path).map_err(|e| DbError::RemoveFailed {
                path: path.display().to_string(),
                source: e,
            })?;
        }
        Self::open(path)
    }

    /// Run `body` inside a transaction, committing on success and rolling
    /// back on error.
    pub fn transaction<F, T>(&self, body: F) -> DbResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> DbResult<T>,
    {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| DbError::TransactionError(format!("BEGIN failed: {e}")))?;

        // Dropping an uncommitted transaction rolls it back
        let value = body(&tx)?;
        tx.commit()
            .map_err(|e| DbError::TransactionError(format!("COMMIT failed: {e}")))?;
        Ok(value)
    }
}

impl Database for SqliteBackend {
    fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn relation_exists(&self, name: &str) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn create_text_table(&self, table: &str, columns: &[String]) -> DbResult<()> {
        let column_defs = columns
            .iter()
            .map(|c| format!("{c} TEXT"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("CREATE TABLE IF NOT EXISTS {table} ({column_defs})");
        self.conn
            .execute(&sql, [])
            .map_err(|e| DbError::ExecutionError(format!("{e}: {sql}")))?;
        Ok(())
    }

    fn upsert_rows(
        &self,
        table: &str,
        columns: &[String],
        rows: &[Vec<Option<String>>],
    ) -> DbResult<usize> {
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT OR REPLACE INTO {table} ({}) VALUES ({placeholders})",
            columns.join(", ")
        );

        self.transaction(|tx| {
            let mut stmt = tx
                .prepare(&sql)
                .map_err(|e| DbError::ExecutionError(format!("{e}: {sql}")))?;
            for (idx, row) in rows.iter().enumerate() {
                if row.len() != columns.len() {
                    return Err(DbError::RowShape {
                        row: idx + 1,
                        found: row.len(),
                        expected: columns.len(),
                    });
                }
                stmt.execute(params_from_iter(row.iter()))?;
            }
            Ok(rows.len())
        })
    }

    fn ensure_config_table(&self) -> DbResult<()> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {CONFIG_TABLE} (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )"
        );
        self.conn.execute(&sql, [])?;
        Ok(())
    }

    fn upsert_config(&self, entries: &[ConfigEntry]) -> DbResult<usize> {
        let sql = format!("INSERT OR REPLACE INTO {CONFIG_TABLE} (key, value) VALUES (?1, ?2)");
        self.transaction(|tx| {
            let mut stmt = tx.prepare(&sql)?;
            for entry in entries {
                stmt.execute(params![entry.key, entry.value])?;
            }
            Ok(entries.len())
        })
    }

    fn ensure_file_table(&self, table: &str) -> DbResult<()> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                ID INTEGER PRIMARY KEY AUTOINCREMENT,
                code TEXT NOT NULL,
                file_blob BLOB NOT NULL
            )"
        );
        self.conn
            .execute(&sql, [])
            .map_err(|e| DbError::ExecutionError(format!("{e}: {sql}")))?;
        Ok(())
    }

    fn insert_files(&self, table: &str, files: &[(String, Vec<u8>)]) -> DbResult<usize> {
        let sql = format!("INSERT INTO {table} (code, file_blob) VALUES (?1, ?2)");
        self.transaction(|tx| {
            let mut stmt = tx
                .prepare(&sql)
                .map_err(|e| DbError::ExecutionError(format!("{e}: {sql}")))?;
            for (code, payload) in files {
                stmt.execute(params![code, payload])?;
            }
            Ok(files.len())
        })
    }

    fn list_tables(&self) -> DbResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND substr(name, 1, 7) != 'sqlite_' \
             ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    fn table_info(&self, table: &str) -> DbResult<Vec<ColumnInfo>> {
        let mut stmt = self.conn.prepare(&format!("PRAGMA table_info({table})"))?;
        let columns = stmt
            .query_map([], |row| {
                Ok(ColumnInfo {
                    name: row.get(1)?,
                    decl_type: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    not_null: row.get::<_, i64>(3)? != 0,
                    default_value: row.get(4)?,
                    primary_key: row.get::<_, i64>(5)? != 0,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        if columns.is_empty() {
            return Err(DbError::TableNotFound(table.to_string()));
        }
        Ok(columns)
    }

    fn row_count(&self, table: &str) -> DbResult<usize> {
        let sql = format!("SELECT COUNT(*) FROM {table}");
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn query_table(&self, table: &str) -> DbResult<TableData> {
        let mut stmt = self.conn.prepare(&format!("SELECT * FROM {table}"))?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let width = columns.len();

        let rows = stmt
            .query_map([], |row| {
                (0..width)
                    .map(|i| row.get_ref(i).map(CellValue::from))
                    .collect::<Result<Vec<_>, _>>()
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TableData { columns, rows })
    }

    fn query_file_rows(&self, table: &str, shape: &FileTableShape) -> DbResult<Vec<FileRow>> {
        let sql = format!(
            "SELECT {}, {} FROM {table} ORDER BY {}",
            shape.code_column, shape.blob_column, shape.id_column
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(FileRow {
                    code: text_of(row.get_ref(0)?),
                    payload: bytes_of(row.get_ref(1)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn db_type(&self) -> &'static str {
        "sqlite"
    }
}

/// A code column value as text; NULL stays `None`
fn text_of(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        other => Some(CellValue::from(other).to_text()),
    }
}

/// A payload column value as raw bytes; NULL stays `None`
fn bytes_of(value: ValueRef<'_>) -> Option<Vec<u8>> {
    match value {
        ValueRef::Null => None,
        ValueRef::Blob(b) | ValueRef::Text(b) => Some(b.to_vec()),
        other => Some(CellValue::from(other).to_text().into_bytes()),
    }
}

#[cfg(test)]
#[path = "sqlite_test.rs"]
mod tests;
