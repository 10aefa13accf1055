//! Key/value config files (`tables/*.config`)
//!
//! Each non-blank, non-comment line is `key=value` or `key: value`:
//!
//! ```text
//! database.name=Arch.db3
//! database.version: 1.0.0
//! title = "Quoted values lose one layer of quotes"
//! ```
//!
//! The line is split on the first `=` when one is present, otherwise on the
//! first `:`. Lines with neither separator, or with an empty key or value,
//! are skipped.

use crate::error::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// One `key -> value` pair destined for the `config` relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

/// Parse a single config line, returning `None` for lines that carry no entry
pub fn parse_config_line(line: &str) -> Option<ConfigEntry> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=').or_else(|| line.split_once(':'))?;
    let key = key.trim();
    let value = strip_quotes(value.trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some(ConfigEntry {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Remove one layer of matching `"` or `'` quotes
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.starts_with(quote) && value.ends_with(quote) {
            return value.get(1..value.len() - 1).unwrap_or_default();
        }
    }
    value
}

/// A parsed key/value config file
#[derive(Debug, Clone)]
pub struct KvConfigFile {
    /// Where the entries were read from
    pub path: PathBuf,

    /// Entries in file order; later duplicates of a key win when upserted
    pub entries: Vec<ConfigEntry>,
}

impl KvConfigFile {
    /// Parse config text
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            path: path.into(),
            entries: content.lines().filter_map(parse_config_line).collect(),
        }
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::ControlFileRead {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self::parse(path, &content))
    }
}

#[cfg(test)]
#[path = "kv_config_test.rs"]
mod tests;
