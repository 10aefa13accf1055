//! Cell values read back out of a relation

use rusqlite::types::ValueRef;
use std::fmt;

/// One cell, keeping SQLite's storage class
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl CellValue {
    /// Textual form used in CSV output; NULL becomes the empty string
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl From<ValueRef<'_>> for CellValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => CellValue::Null,
            ValueRef::Integer(i) => CellValue::Integer(i),
            ValueRef::Real(f) => CellValue::Real(f),
            ValueRef::Text(t) => CellValue::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => CellValue::Blob(b.to_vec()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Debug keeps the trailing ".0" on integral reals
            CellValue::Real(r) => write!(f, "{r:?}"),
            CellValue::Text(t) => f.write_str(t),
            CellValue::Blob(b) => f.write_str(&String::from_utf8_lossy(b)),
        }
    }
}

/// Every row of a relation, in column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl TableData {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
