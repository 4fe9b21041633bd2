//! `strata path` — print the store path of a single asset.
//!
//! Resolves the named asset (triggering regeneration if the store entry is
//! missing or stale) and prints its store path on stdout, so the output can
//! feed templating or deploy scripts directly.

use crate::project::open_pipeline;
use crate::{GlobalArgs, PathArgs};

/// Runs the `strata path` command.
pub fn run(args: &PathArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut pipeline = open_pipeline(global)?;
    let path = pipeline.store_path(&args.name)?;
    pipeline.flush()?;
    println!("{}", path.display());
    Ok(0)
}
