//! Asset resolution and combination orchestrator.
//!
//! Ties the content store, catalog, ephemeral cache, and filter pipeline
//! together: discovers source assets, resolves each through the tiered
//! cache (ephemeral → store → regenerate), and builds combined artifacts
//! on demand.

#![warn(missing_docs)]

pub mod discover;
pub mod error;
pub mod pipeline;

pub use error::PipelineError;
pub use pipeline::AssetPipeline;
