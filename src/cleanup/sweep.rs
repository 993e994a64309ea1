//! Removal of merged clips and the concat manifest.

use std::path::Path;

use log::{debug, info};
use thiserror::Error;
use walkdir::WalkDir;

use crate::concat::is_clip_name;
use crate::config::LayoutConfig;

/// Errors that can occur during cleanup.
#[derive(Error, Debug)]
pub enum CleanupError {
    #[error("Failed to walk {0}")]
    Walk(#[from] walkdir::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Delete every `merged_*.mp4` below `dir` and the manifest in `dir`.
///
/// Returns the number of files removed.
pub fn clean_up(dir: &Path, layout: &LayoutConfig) -> Result<usize, CleanupError> {
    let mut removed = 0;

    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if is_clip_name(&name, layout) {
            std::fs::remove_file(entry.path())?;
            debug!("Removed {}", entry.path().display());
            removed += 1;
        }
    }

    let manifest = dir.join(&layout.manifest_name);
    if manifest.exists() {
        std::fs::remove_file(&manifest)?;
        debug!("Removed {}", manifest.display());
        removed += 1;
    }

    info!("Cleanup removed {removed} file(s)");
    Ok(removed)
}
