//! Copy built artifacts back into the source tree

use crate::error::{PackError, PackResult};
use crate::exporter::{export_database, ExportOptions};
use crate::report::ExportReport;
use dbpack_core::layout::{FILES_DIR, TABLES_DIR};
use dbpack_core::{Project, TargetName};

/// Export the artifact of `target` as CSV into `data_path/<target>/`.
///
/// The target, `tables/` and `files/` directories are created if they do
/// not exist yet. Existing files with the same names are overwritten;
/// nothing else in the target is removed.
pub fn sync_artifact(project: &Project, target: &TargetName) -> PackResult<ExportReport> {
    let artifact = project.artifact_path(target);
    if !artifact.is_file() {
        return Err(PackError::DatabaseNotFound {
            path: artifact.display().to_string(),
        });
    }

    let target_dir = project.data_dir().join(target.as_str());
    if !target_dir.is_dir() {
        log::info!("Creating target directory {}", target_dir.display());
    }
    for dir in [target_dir.join(TABLES_DIR), target_dir.join(FILES_DIR)] {
        std::fs::create_dir_all(&dir).map_err(|e| PackError::io(&dir, e))?;
    }

    let options = ExportOptions {
        csv: true,
        json: false,
    };
    export_database(&artifact, &target_dir, &options)
}
