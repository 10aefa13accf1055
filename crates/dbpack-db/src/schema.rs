//! Relation introspection and the file-table shape test

/// One row of `PRAGMA table_info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    /// Declared type, empty when the column has none
    pub decl_type: String,
    pub not_null: bool,
    pub default_value: Option<String>,
    pub primary_key: bool,
}

/// Column names (in their stored case) of a relation with the
/// identifier/code/blob shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTableShape {
    pub id_column: String,
    pub code_column: String,
    pub blob_column: String,
}

impl FileTableShape {
    /// Column names accepted for the payload, compared case-insensitively
    pub const BLOB_COLUMNS: [&'static str; 2] = ["file_blob", "fileblob"];

    /// Detect the file-table shape.
    ///
    /// Matches when the columns, compared case-insensitively, include `id`,
    /// `code` and one of `file_blob`/`fileblob`. Extra columns do not
    /// prevent a match.
    pub fn detect(columns: &[ColumnInfo]) -> Option<Self> {
        let find = |wanted: &str| {
            columns
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(wanted))
                .map(|c| c.name.clone())
        };

        Some(Self {
            id_column: find("id")?,
            code_column: find("code")?,
            blob_column: Self::BLOB_COLUMNS.iter().find_map(|&name| find(name))?,
        })
    }
}

/// One stored file: its name and its payload, either of which may be NULL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRow {
    pub code: Option<String>,
    pub payload: Option<Vec<u8>>,
}
