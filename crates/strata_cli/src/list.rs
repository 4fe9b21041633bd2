//! `strata list` — show registered assets and their catalog state.
//!
//! One line per registered asset: file name, kind, content hash, and
//! whether the current content is catalogued, stale (a different hash is
//! catalogued for the same source), or not yet built.

use crate::project::open_pipeline;
use crate::{GlobalArgs, ListArgs};

/// Runs the `strata list` command.
pub fn run(args: &ListArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut pipeline = open_pipeline(global)?;

    let resources = pipeline.registered(args.kind.as_deref())?;
    for resource in &resources {
        let state = match pipeline.catalog().contains(resource) {
            Some(hash) if hash == resource.hash() => "built",
            Some(_) => "stale",
            None => "unbuilt",
        };
        println!(
            "{:<8} {:<4} {} {}",
            state,
            resource.kind(),
            resource.hash(),
            resource.file_name()
        );
    }

    if !global.quiet {
        eprintln!("{} registered asset(s)", resources.len());
    }
    Ok(0)
}
