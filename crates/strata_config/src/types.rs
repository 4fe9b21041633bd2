//! Strongly-typed configuration structures.

use serde::Deserialize;
use std::path::PathBuf;

/// Default ephemeral cache lifetime: one day.
pub const DEFAULT_CACHE_LIFETIME_SECS: u64 = 86_400;

/// Asset kinds recognized when no explicit list is configured.
pub const DEFAULT_KINDS: &[&str] = &["css", "js"];

/// Top-level `strata.toml` configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Content store settings.
    pub store: StoreConfig,

    /// Ephemeral cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Source asset settings.
    pub sources: SourcesConfig,

    /// Filters to enable, in declaration order. When absent, the built-in
    /// minifiers are enabled at the default priority.
    #[serde(default, rename = "filter")]
    pub filters: Vec<FilterConfig>,
}

/// Content store settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Directory holding store entries and the catalog snapshot.
    pub directory: PathBuf,
}

/// Ephemeral cache settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Which cache implementation backs the ephemeral tier.
    pub backend: CacheBackend,

    /// Entry lifetime in seconds; `0` means no expiry. Ignored by the
    /// memory backend.
    pub lifetime_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            lifetime_secs: DEFAULT_CACHE_LIFETIME_SECS,
        }
    }
}

/// Selectable ephemeral cache implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process map; lifetimes ignored.
    Memory,
    /// In-process map honoring per-entry lifetimes.
    Ttl,
    /// No caching; every resolution goes to the store.
    None,
}

/// Source asset settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    /// Directories scanned for source assets, in registration order.
    pub directories: Vec<PathBuf>,

    /// Recognized asset kinds (file extensions). Defaults to css and js.
    #[serde(default = "default_kinds")]
    pub kinds: Vec<String>,
}

fn default_kinds() -> Vec<String> {
    DEFAULT_KINDS.iter().map(|k| k.to_string()).collect()
}

/// One enabled filter.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// Registry name of the filter (e.g. `css-minify`).
    pub name: String,

    /// Pipeline priority; occupied priorities probe forward.
    #[serde(default = "default_priority")]
    pub priority: u32,
}

fn default_priority() -> u32 {
    50
}
