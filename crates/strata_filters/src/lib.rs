//! Content filters and the priority-ordered filter pipeline.
//!
//! A filter is a named, pure transform over an asset's content buffer,
//! scoped to one or more asset kinds. The pipeline applies every matching
//! filter in ascending priority order, each seeing the previous filter's
//! output. Filters must be deterministic: hashes derived from filtered
//! content rely on it.

#![warn(missing_docs)]

pub mod filter;
pub mod minify;
pub mod pipeline;
pub mod registry;

pub use filter::Filter;
pub use minify::{CssMinifier, JsMinifier};
pub use pipeline::{FilterPipeline, DEFAULT_PRIORITY};
pub use registry::FilterRegistry;
