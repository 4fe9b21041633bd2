//! Parsing and validation of `strata.toml` project configuration files.
//!
//! This crate reads the project configuration and produces a strongly-typed
//! [`ProjectConfig`] covering the store directory, ephemeral cache backend,
//! source directories, and filter enablement.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{CacheBackend, CacheConfig, FilterConfig, ProjectConfig, SourcesConfig, StoreConfig};
