//! Shared project helpers for CLI commands.
//!
//! Contains the utilities every command needs: project root resolution
//! (walking up to the nearest `strata.toml`) and pipeline construction
//! from the loaded configuration.

use std::path::{Path, PathBuf};

use strata_pipeline::AssetPipeline;

use crate::GlobalArgs;

/// Walks up from `start` looking for the nearest directory containing `strata.toml`.
///
/// Returns the directory containing `strata.toml`, or an error if none is found.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join("strata.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find strata.toml in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root directory from global CLI args.
///
/// If `--config` is specified, uses that path (file → parent dir, dir →
/// itself). Otherwise walks up from the current directory looking for
/// `strata.toml`.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            Ok(p.parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        find_project_root(&std::env::current_dir()?)
    }
}

/// Loads the project config and wires a pipeline over it.
pub fn open_pipeline(global: &GlobalArgs) -> Result<AssetPipeline, Box<dyn std::error::Error>> {
    let project_dir = resolve_project_root(global)?;
    let config = strata_config::load_config(&project_dir)?;
    Ok(AssetPipeline::new(&config)?)
}
