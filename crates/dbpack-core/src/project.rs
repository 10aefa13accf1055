//! Project discovery and loading

use crate::config::ProjectConfig;
use crate::error::{CoreError, CoreResult};
use crate::layout::{glob_files, TargetLayout};
use crate::target_name::TargetName;
use std::path::{Path, PathBuf};

/// A dbpack project: a root directory plus its configuration
#[derive(Debug, Clone)]
pub struct Project {
    /// Project root directory
    pub root: PathBuf,

    /// Project configuration
    pub config: ProjectConfig,
}

impl Project {
    /// Load a project from `root`, reading `config_path` when given or
    /// probing the root for dbpack.yml otherwise.
    pub fn load(root: &Path, config_path: Option<&Path>) -> CoreResult<Self> {
        if !root.is_dir() {
            return Err(CoreError::ProjectNotFound {
                path: root.display().to_string(),
            });
        }
        let config = match config_path {
            Some(path) => ProjectConfig::load(path)?,
            None => ProjectConfig::load_from_dir(root)?,
        };
        Ok(Self::with_config(root, config))
    }

    /// Build a project from an already-loaded configuration
    pub fn with_config(root: &Path, config: ProjectConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.config.data_path_absolute(&self.root)
    }

    pub fn build_dir(&self) -> PathBuf {
        self.config.build_path_absolute(&self.root)
    }

    pub fn export_dir(&self) -> PathBuf {
        self.config.export_path_absolute(&self.root)
    }

    /// Layout of the target directory `data/<name>`
    pub fn target_layout(&self, name: &TargetName) -> TargetLayout {
        TargetLayout::new(self.data_dir().join(name.as_str()))
    }

    /// Artifact path `build/<name>.<ext>`
    pub fn artifact_path(&self, name: &TargetName) -> PathBuf {
        self.build_dir().join(format!("{}.{}", name, self.config.artifact_extension))
    }

    /// Targets under the data path, sorted.
    ///
    /// A target is a non-hidden directory that has `tables/`, `files/` or
    /// `schema.sql`. A missing data path yields no targets.
    pub fn available_targets(&self) -> CoreResult<Vec<TargetName>> {
        let data_dir = self.data_dir();
        if !data_dir.is_dir() {
            return Ok(Vec::new());
        }
        let entries = std::fs::read_dir(&data_dir).map_err(|e| CoreError::IoWithPath {
            path: data_dir.display().to_string(),
            source: e,
        })?;

        let mut targets: Vec<TargetName> = entries
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().to_str().map(String::from))
            .filter(|name| !name.starts_with('.'))
            .filter_map(TargetName::try_new)
            .filter(|name| self.target_layout(name).is_target())
            .collect();
        targets.sort();
        Ok(targets)
    }

    /// Artifacts present in the build path, by stem, sorted
    pub fn available_artifacts(&self) -> CoreResult<Vec<TargetName>> {
        let pattern = format!("*.{}", self.config.artifact_extension);
        let mut names: Vec<TargetName> = glob_files(&self.build_dir(), &pattern)?
            .iter()
            .filter_map(|path| path.file_stem()?.to_str())
            .filter_map(TargetName::try_new)
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
