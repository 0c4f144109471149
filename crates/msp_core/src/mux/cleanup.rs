//! Best-effort removal of per-stream artifacts.

use std::io;
use std::path::{Path, PathBuf};

use crate::logging::RunLogger;

/// What happened to each temp file.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, io::Error)>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Delete every file in `files`.
///
/// A file that cannot be removed is logged and skipped; the rest are still
/// attempted. Files that are already gone count as removed.
pub fn delete_temp_files<P: AsRef<Path>>(files: &[P], logger: &RunLogger) -> CleanupReport {
    let mut report = CleanupReport::default();

    for file in files {
        let path = file.as_ref();
        match std::fs::remove_file(path) {
            Ok(()) => {
                logger.debug(&format!("Removed {}", path.display()));
                report.removed.push(path.to_path_buf());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                report.removed.push(path.to_path_buf());
            }
            Err(e) => {
                logger.warn(&format!("Could not remove {}: {}", path.display(), e));
                tracing::warn!(path = %path.display(), error = %e, "temp file cleanup failed");
                report.failed.push((path.to_path_buf(), e));
            }
        }
    }

    report
}
