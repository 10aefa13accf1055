//! Per-item outcomes of a build or export

use dbpack_core::TargetName;
use std::fmt;
use std::path::PathBuf;

/// Build phase an item belongs to, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Schema,
    Tables,
    Config,
    Scripts,
    Files,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Schema => write!(f, "schema"),
            Phase::Tables => write!(f, "tables"),
            Phase::Config => write!(f, "config"),
            Phase::Scripts => write!(f, "scripts"),
            Phase::Files => write!(f, "files"),
        }
    }
}

/// What happened to one table, file, script or control file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    /// Loaded or exported `rows` rows (or files)
    Loaded { rows: usize },
    /// Script executed
    Executed,
    /// Processed, but there was nothing in it
    Empty,
    /// Named by an inclusion list but not present on disk
    Missing,
    /// Caught and reported; processing continued
    Failed(String),
}

impl ItemStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, ItemStatus::Failed(_))
    }
}

/// Outcome of one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    pub phase: Phase,
    /// Table name, or file name for config files and scripts
    pub item: String,
    /// Source or destination file, when there is one
    pub path: Option<PathBuf>,
    pub status: ItemStatus,
}

/// How the CSV tables of a build were selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSource {
    /// No `tables/` directory
    None,
    /// Names from `tables/tables.config`
    InclusionList { count: usize },
    /// Every CSV discovered in `tables/`
    Discovered,
}

/// Result of building one target
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub target: TargetName,
    pub artifact: PathBuf,
    pub schema_applied: bool,
    pub table_source: TableSource,
    /// Number of file tables named by `files/tables.config`; `None` when the
    /// list is absent or empty and the phase was skipped
    pub file_tables_listed: Option<usize>,
    pub items: Vec<ItemOutcome>,
}

impl BuildReport {
    pub fn new(target: TargetName, artifact: PathBuf) -> Self {
        Self {
            target,
            artifact,
            schema_applied: false,
            table_source: TableSource::None,
            file_tables_listed: None,
            items: Vec::new(),
        }
    }

    pub(crate) fn push(
        &mut self,
        phase: Phase,
        item: impl Into<String>,
        path: Option<PathBuf>,
        status: ItemStatus,
    ) {
        self.items.push(ItemOutcome {
            phase,
            item: item.into(),
            path,
            status,
        });
    }

    /// Items of one phase, in processing order
    pub fn phase_items(&self, phase: Phase) -> impl Iterator<Item = &ItemOutcome> {
        self.items.iter().filter(move |i| i.phase == phase)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.items.iter().filter(|i| i.status.is_failure())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Result of exporting one artifact
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub database: PathBuf,
    pub output_dir: PathBuf,
    /// User tables found in the database, whatever the selected formats
    pub table_count: usize,
    pub items: Vec<ItemOutcome>,
}

impl ExportReport {
    pub fn new(database: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            database,
            output_dir,
            table_count: 0,
            items: Vec::new(),
        }
    }

    pub(crate) fn push(
        &mut self,
        phase: Phase,
        item: impl Into<String>,
        path: Option<PathBuf>,
        status: ItemStatus,
    ) {
        self.items.push(ItemOutcome {
            phase,
            item: item.into(),
            path,
            status,
        });
    }

    /// True when the database held no user tables
    pub fn is_empty(&self) -> bool {
        self.table_count == 0
    }

    pub fn has_failures(&self) -> bool {
        self.items.iter().any(|i| i.status.is_failure())
    }
}
