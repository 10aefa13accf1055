//! Error types for dbpack-db

use thiserror::Error;

/// Database operation errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Table not found (D003)
    #[error("[D003] Table not found: {0}")]
    TableNotFound(String),

    /// Transaction management error (D004)
    #[error("[D004] Transaction failed: {0}")]
    TransactionError(String),

    /// Artifact file could not be replaced (D005)
    #[error("[D005] Failed to remove existing database '{path}': {source}")]
    RemoveFailed {
        path: String,
        source: std::io::Error,
    },

    /// Row shape does not match the target columns (D006)
    #[error("[D006] Row {row} has {found} values, expected {expected}")]
    RowShape {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        let msg = err.to_string();
        if msg.starts_with("no such table") {
            DbError::TableNotFound(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }
}
