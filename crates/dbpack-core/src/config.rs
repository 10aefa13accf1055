//! Configuration types and parsing for dbpack.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default directory holding one subdirectory per target
pub const DEFAULT_DATA_PATH: &str = "data";

/// Default directory the built artifacts are written to
pub const DEFAULT_BUILD_PATH: &str = "build";

/// Default directory `export` writes per-database folders to
pub const DEFAULT_EXPORT_PATH: &str = "build/export";

/// Default artifact file extension
pub const DEFAULT_ARTIFACT_EXTENSION: &str = "db3";

/// File names probed by [`ProjectConfig::load_from_dir`]
const CONFIG_FILE_NAMES: [&str; 2] = ["dbpack.yml", "dbpack.yaml"];

/// Project configuration from dbpack.yml
///
/// Every field is optional; a project without a config file uses the
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Directory containing target directories
    #[serde(default = "default_data_path")]
    pub data_path: String,

    /// Directory artifacts are written to
    #[serde(default = "default_build_path")]
    pub build_path: String,

    /// Directory named exports are written to
    #[serde(default = "default_export_path")]
    pub export_path: String,

    /// Artifact extension, without the leading dot
    #[serde(default = "default_artifact_extension")]
    pub artifact_extension: String,

    /// Write JSON on export as if `--json` were given
    #[serde(default)]
    pub export_json: bool,
}

fn default_data_path() -> String {
    DEFAULT_DATA_PATH.to_string()
}

fn default_build_path() -> String {
    DEFAULT_BUILD_PATH.to_string()
}

fn default_export_path() -> String {
    DEFAULT_EXPORT_PATH.to_string()
}

fn default_artifact_extension() -> String {
    DEFAULT_ARTIFACT_EXTENSION.to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            build_path: default_build_path(),
            export_path: default_export_path(),
            artifact_extension: default_artifact_extension(),
            export_json: false,
        }
    }
}

impl ProjectConfig {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: ProjectConfig =
            serde_yaml::from_str(&content).map_err(|e| CoreError::ConfigParseError {
                path: path.display().to_string(),
                source: e,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory.
    ///
    /// Looks for dbpack.yml or dbpack.yaml and falls back to the defaults
    /// when neither exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if path.exists() {
                log::debug!("Loading project config from {}", path.display());
                return Self::load(&path);
            }
        }
        log::debug!("No project config in {}, using defaults", dir.display());
        Ok(Self::default())
    }

    fn validate(&self) -> CoreResult<()> {
        let paths = [
            ("data_path", &self.data_path),
            ("build_path", &self.build_path),
            ("export_path", &self.export_path),
        ];
        for (field, value) in paths {
            if value.trim().is_empty() {
                return Err(CoreError::ConfigInvalid {
                    message: format!("'{field}' cannot be empty"),
                });
            }
        }

        let ext = self.artifact_extension.as_str();
        if ext.is_empty() || ext.starts_with('.') || ext.contains(['/', '\\']) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "'artifact_extension' must be a bare extension like 'db3', got '{ext}'"
                ),
            });
        }
        Ok(())
    }

    /// Absolute data path for a project rooted at `root`
    pub fn data_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.data_path)
    }

    /// Absolute build path for a project rooted at `root`
    pub fn build_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.build_path)
    }

    /// Absolute export path for a project rooted at `root`
    pub fn export_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.export_path)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
