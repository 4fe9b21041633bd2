//! Source asset discovery.
//!
//! Produces the ordered candidate list the orchestrator registers: each
//! configured source directory is scanned (non-recursively) for files whose
//! extension is a recognized asset kind. Hidden entries are skipped.
//! Entries within a directory are sorted by name so the sequence is stable
//! for a given filesystem state; directories keep their registration order.

use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// Checks that a source directory exists and is readable.
///
/// Raised at registration time, before any resolution happens.
pub fn validate_source_dir(dir: &Path) -> Result<(), PipelineError> {
    if !dir.is_dir() {
        return Err(PipelineError::Configuration(format!(
            "source directory {} is not readable",
            dir.display()
        )));
    }
    Ok(())
}

/// Scans the given directories for asset files of the recognized kinds.
///
/// Returns full paths in directory order, sorted by file name within each
/// directory. Dot-files and subdirectories are excluded.
pub fn discover_assets(
    dirs: &[PathBuf],
    kinds: &[String],
) -> Result<Vec<PathBuf>, PipelineError> {
    let mut found = Vec::new();
    for dir in dirs {
        let entries = std::fs::read_dir(dir).map_err(|_| {
            PipelineError::Configuration(format!(
                "source directory {} is not readable",
                dir.display()
            ))
        })?;

        let mut in_dir = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            let recognized = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| kinds.iter().any(|k| k == ext));
            if recognized {
                in_dir.push(path);
            }
        }
        in_dir.sort();
        found.extend(in_dir);
    }
    Ok(found)
}
