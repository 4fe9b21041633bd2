//! `strata clear` — drop every store entry and empty the catalog.

use crate::project::open_pipeline;
use crate::GlobalArgs;

/// Runs the `strata clear` command.
pub fn run(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut pipeline = open_pipeline(global)?;
    let removed = pipeline.clear()?;
    pipeline.flush()?;
    if !global.quiet {
        eprintln!("removed {removed} store file(s)");
    }
    Ok(0)
}
