//! dbpack-core - Core library for dbpack
//!
//! This crate provides the project configuration, the on-disk layout of a
//! target directory, and the parsers for the two line-oriented control file
//! formats (inclusion lists and key/value config files) shared by the
//! importer and exporter.

pub mod config;
pub mod error;
pub mod inclusion;
pub mod kv_config;
pub mod layout;
mod newtype_string;
pub mod project;
pub mod table_name;
pub mod target_name;

pub use config::ProjectConfig;
pub use error::{CoreError, CoreResult};
pub use inclusion::InclusionList;
pub use kv_config::{parse_config_line, ConfigEntry, KvConfigFile};
pub use layout::TargetLayout;
pub use project::Project;
pub use table_name::TableName;
pub use target_name::TargetName;
