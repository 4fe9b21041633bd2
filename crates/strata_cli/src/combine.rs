//! `strata combine` — build a combined artifact for one asset kind.
//!
//! Resolves every selected member in registration order, concatenates the
//! filtered content, and prints the aggregate's store path.

use crate::project::open_pipeline;
use crate::{CombineArgs, GlobalArgs};

/// Runs the `strata combine` command.
pub fn run(args: &CombineArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let mut pipeline = open_pipeline(global)?;

    let includes = (!args.include.is_empty()).then_some(args.include.as_slice());
    let excludes = (!args.exclude.is_empty()).then_some(args.exclude.as_slice());

    let path = pipeline.combine(&args.kind, includes, excludes)?;
    pipeline.flush()?;
    println!("{}", path.display());
    Ok(0)
}
