//! Strongly-typed relation name.

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// A non-empty relation name, taken verbatim from a file name, a
    /// subdirectory name or an inclusion list entry.
    ///
    /// No escaping is applied: the name is interpolated into SQL as-is, so
    /// it must already be a valid SQLite identifier.
    pub struct TableName;
}
