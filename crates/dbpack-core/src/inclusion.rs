//! Inclusion lists (`tables.config`)
//!
//! An inclusion list names the relations that take part in a build. Two
//! line formats are accepted and may be mixed:
//!
//! ```text
//! # one name per line
//! users
//! logs
//! # or a comma-separated list
//! tables=users,config,logs
//! ```
//!
//! Lines are trimmed; blank lines and `#` comments are ignored. Names keep
//! their first-seen order and duplicates are dropped.

use crate::error::{CoreError, CoreResult};
use crate::table_name::TableName;
use std::path::Path;

/// Prefix of the comma-separated form
const TABLES_PREFIX: &str = "tables=";

/// Ordered, duplicate-free list of relation names read from a control file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InclusionList {
    names: Vec<TableName>,
}

impl InclusionList {
    /// Parse inclusion list text
    pub fn parse(content: &str) -> Self {
        let mut list = Self::default();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix(TABLES_PREFIX) {
                for name in rest.split(',') {
                    list.push(name.trim());
                }
            } else {
                list.push(line);
            }
        }
        list
    }

    /// Read an inclusion list from disk.
    ///
    /// Returns `Ok(None)` when the file does not exist, `Ok(Some(list))` when
    /// it was read (the list may be empty), and an error when it exists but
    /// cannot be read as UTF-8 text.
    pub fn load(path: &Path) -> CoreResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::ControlFileRead {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Some(Self::parse(&content)))
    }

    fn push(&mut self, name: &str) {
        if let Some(name) = TableName::try_new(name) {
            if !self.names.contains(&name) {
                self.names.push(name);
            }
        }
    }

    /// Consume the list, returning its names in file order
    pub fn into_names(self) -> Vec<TableName> {
        self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Render an inclusion list file: `header` lines as `#` comments, a blank
    /// line, then one name per line.
    pub fn render<S: AsRef<str>>(header: &[&str], names: &[S]) -> String {
        let mut out = String::new();
        for line in header {
            out.push_str("# ");
            out.push_str(line);
            out.push('\n');
        }
        if !header.is_empty() {
            out.push('\n');
        }
        for name in names {
            out.push_str(name.as_ref());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
#[path = "inclusion_test.rs"]
mod tests;
