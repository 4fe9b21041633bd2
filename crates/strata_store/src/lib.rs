//! Durable storage layer for the strata asset pipeline.
//!
//! This crate provides the content-addressed file store, the catalog that
//! tracks which hashes are live for which source files, the in-memory
//! resource model, and the swappable ephemeral cache contract.

#![warn(missing_docs)]

pub mod catalog;
pub mod ephemeral;
pub mod error;
pub mod resource;
pub mod store;

pub use catalog::{Catalog, CatalogEntry, CATALOG_FILE};
pub use ephemeral::{MemoryCache, NullCache, ResourceCache, TtlCache};
pub use error::StoreError;
pub use resource::Resource;
pub use store::ContentStore;
