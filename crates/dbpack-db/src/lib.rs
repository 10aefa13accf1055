//! dbpack-db - Database layer for dbpack
//!
//! This crate provides the `Database` trait used by the importer and
//! exporter, and its SQLite implementation writing `.db3` artifacts.

pub mod error;
pub mod schema;
pub mod sqlite;
pub mod traits;
pub mod value;

pub use error::{DbError, DbResult};
pub use schema::{ColumnInfo, FileRow, FileTableShape};
pub use sqlite::{SqliteBackend, CONFIG_TABLE};
pub use traits::Database;
pub use value::{CellValue, TableData};
