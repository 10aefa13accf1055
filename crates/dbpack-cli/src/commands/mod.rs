//! CLI command implementations

pub(crate) mod build;
pub(crate) mod common;
pub(crate) mod export;
pub(crate) mod gen_config;
pub(crate) mod sync;
