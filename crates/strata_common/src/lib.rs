//! Shared foundational types for the strata asset pipeline.
//!
//! This crate provides the content hash used as the identity key for every
//! store, cache, and catalog lookup in the pipeline.

#![warn(missing_docs)]

pub mod hash;

pub use hash::ContentHash;
