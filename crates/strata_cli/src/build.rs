//! `strata build` — resolve every registered asset into the store.
//!
//! Discovers registered assets (optionally one kind), resolves each through
//! the tiered cache, and prints the resulting store paths. The catalog
//! snapshot is flushed before exit.

use crate::project::open_pipeline;
use crate::{BuildArgs, GlobalArgs};

/// Runs the `strata build` command.
///
/// Returns exit code 0 on success; a single unreadable source aborts the
/// whole build.
pub fn run(args: &BuildArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut pipeline = open_pipeline(global)?;

    let resources = pipeline.registered(args.kind.as_deref())?;
    if resources.is_empty() {
        if !global.quiet {
            match args.kind.as_deref() {
                Some(kind) => eprintln!("no registered assets of kind '{kind}'"),
                None => eprintln!("no registered assets"),
            }
        }
        return Ok(0);
    }

    for resource in &resources {
        let resolved = pipeline.resolve(resource)?;
        let path = pipeline.store().entry_path(resolved.hash(), resolved.kind());
        if !global.quiet {
            println!("{}  {}", resource.file_name(), path.display());
        }
    }

    pipeline.flush()?;

    if !global.quiet {
        eprintln!("built {} asset(s)", resources.len());
    }
    Ok(0)
}
