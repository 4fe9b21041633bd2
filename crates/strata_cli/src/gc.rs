//! `strata gc` — reclaim store entries the catalog no longer references.

use crate::project::open_pipeline;
use crate::GlobalArgs;

/// Runs the `strata gc` command.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut pipeline = open_pipeline(global)?;
    let removed = pipeline.gc()?;
    pipeline.flush()?;
    if !global.quiet {
        eprintln!("removed {removed} orphaned store file(s)");
    }
    Ok(0)
}
