//! Error types for dbpack-core

use thiserror::Error;

/// Core error type for dbpack
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config {path}: {source}")]
    ConfigParseError {
        path: String,
        source: serde_yaml::Error,
    },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Project directory not found
    #[error("[E004] Project directory not found: {path}")]
    ProjectNotFound { path: String },

    /// E005: Target directory not found under the data path
    #[error("[E005] Target directory not found: {path}")]
    TargetNotFound { path: String },

    /// E006: Control file could not be read
    #[error("[E006] Failed to read control file '{path}': {source}")]
    ControlFileRead {
        path: String,
        source: std::io::Error,
    },

    /// E007: Invalid glob pattern during discovery
    #[error("[E007] Invalid discovery pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// E008: IO error with file path context
    #[error("[E008] IO error on '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
