//! dbpack-pack - The directory <-> database packaging convention
//!
//! [`importer`] builds one SQLite artifact per target directory and
//! [`exporter`] writes an artifact back out in the same layout. [`sync`]
//! chains the two for round-tripping build output into the source tree, and
//! [`scaffold`] writes inclusion lists from what is already on disk.

pub mod error;
pub mod exporter;
pub mod importer;
pub mod report;
pub mod scaffold;
pub mod sync;

pub use error::{PackError, PackResult};
pub use exporter::{describe_tables, export_database, ExportOptions, TableKind, TableSummary};
pub use importer::{
    apply_schema, build_target, load_config_file, load_csv_table, load_file_table, run_script,
};
pub use report::{BuildReport, ExportReport, ItemOutcome, ItemStatus, Phase, TableSource};
pub use scaffold::{generate_inclusion_lists, ScaffoldOutcome};
pub use sync::sync_artifact;
